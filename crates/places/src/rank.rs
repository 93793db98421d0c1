//! Distance ranking.

use crate::place::{Place, RankedPlace};
use sportspot_geo::{distance_km, Coordinate};
use std::sync::Arc;

/// Below this many places the thread-pool handoff costs more than it saves.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// Attach distances from `origin` and order closest first.
///
/// Without an origin every distance is `None` and the input order is kept.
/// With one, the sort is stable: places at equal distance keep their input
/// order. Inputs are shared, never modified.
pub fn rank(places: &[Arc<Place>], origin: Option<Coordinate>) -> Vec<RankedPlace> {
    let Some(origin) = origin else {
        return places
            .iter()
            .map(|place| RankedPlace {
                place: Arc::clone(place),
                distance_km: None,
                rank: None,
            })
            .collect();
    };

    let mut ranked: Vec<(f64, &Arc<Place>)> = distances(places, &origin);
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (distance, place))| RankedPlace {
            place: Arc::clone(place),
            distance_km: Some(distance),
            rank: Some(i),
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn distances<'a>(places: &'a [Arc<Place>], origin: &Coordinate) -> Vec<(f64, &'a Arc<Place>)> {
    use rayon::prelude::*;

    if places.len() < PARALLEL_THRESHOLD {
        return sequential_distances(places, origin);
    }
    places
        .par_iter()
        .map(|place| (distance_km(origin, &place.coordinate), place))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn distances<'a>(places: &'a [Arc<Place>], origin: &Coordinate) -> Vec<(f64, &'a Arc<Place>)> {
    sequential_distances(places, origin)
}

fn sequential_distances<'a>(
    places: &'a [Arc<Place>],
    origin: &Coordinate,
) -> Vec<(f64, &'a Arc<Place>)> {
    places
        .iter()
        .map(|place| (distance_km(origin, &place.coordinate), place))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Arc<Place>> {
        vec![
            Arc::new(Place::new("far", "Far Field", "pitch", Coordinate::new(14.00, 100.50))),
            Arc::new(Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.50))),
            Arc::new(Place::new("2", "North Park", "park", Coordinate::new(13.80, 100.50))),
        ]
    }

    #[test]
    fn test_no_origin_passes_through() {
        let ranked = rank(&places(), None);
        let ids: Vec<_> = ranked.iter().map(RankedPlace::id).collect();
        assert_eq!(ids, ["far", "1", "2"]);
        assert!(ranked.iter().all(|p| p.distance_km.is_none() && p.rank.is_none()));
    }

    #[test]
    fn test_sorted_by_distance() {
        let ranked = rank(&places(), Some(Coordinate::new(13.75, 100.50)));
        let ids: Vec<_> = ranked.iter().map(RankedPlace::id).collect();
        assert_eq!(ids, ["1", "2", "far"]);
        assert_eq!(ranked[0].distance_km, Some(0.0));
        assert!((ranked[1].distance_km.unwrap() - 5.56).abs() < 0.01);
        assert_eq!(ranked[2].rank, Some(2));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let here = Coordinate::new(13.75, 100.50);
        let input: Vec<Arc<Place>> = ["b", "a", "c"]
            .into_iter()
            .map(|id| Arc::new(Place::new(id, id, "gym", here)))
            .collect();

        let ids: Vec<_> = rank(&input, Some(here)).iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_shares_places() {
        let input = places();
        let ranked = rank(&input, Some(Coordinate::new(0.0, 0.0)));
        assert!(ranked.iter().any(|r| Arc::ptr_eq(&r.place, &input[0])));
        assert_eq!(Arc::strong_count(&input[0]), 2);
    }

    #[test]
    fn test_empty() {
        assert!(rank(&[], Some(Coordinate::new(0.0, 0.0))).is_empty());
        assert!(rank(&[], None).is_empty());
    }
}
