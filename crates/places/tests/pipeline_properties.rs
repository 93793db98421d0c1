//! Properties of the rank → filter pipeline over generated inputs.

use proptest::prelude::*;
use sportspot_places::{apply, rank, Coordinate, FilterParams, Place, RankedPlace};
use std::sync::Arc;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

fn places() -> impl Strategy<Value = Vec<Arc<Place>>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["Arena", "Pool", "Court", "Track", "Gym"]),
            prop::sample::select(vec!["stadium", "pool", "pitch", "gym"]),
            coordinate(),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, category, c))| Arc::new(Place::new(i.to_string(), name, category, c)))
            .collect()
    })
}

fn ids(view: &[RankedPlace]) -> Vec<String> {
    view.iter().map(|p| p.id().to_string()).collect()
}

proptest! {
    #[test]
    fn ranked_distances_are_non_decreasing(places in places(), origin in coordinate()) {
        let ranked = rank(&places, Some(origin));
        prop_assert_eq!(ranked.len(), places.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distance_km.unwrap() <= pair[1].distance_km.unwrap());
        }
        for (i, p) in ranked.iter().enumerate() {
            prop_assert_eq!(p.rank, Some(i));
        }
    }

    #[test]
    fn no_origin_preserves_repository_order(places in places()) {
        let ranked = rank(&places, None);
        let expected: Vec<String> = places.iter().map(|p| p.id.clone()).collect();
        prop_assert_eq!(ids(&ranked), expected);
        prop_assert!(ranked.iter().all(|p| p.distance_km.is_none() && p.rank.is_none()));
    }

    #[test]
    fn empty_params_are_identity(places in places(), origin in coordinate()) {
        let ranked = rank(&places, Some(origin));
        prop_assert_eq!(apply(ranked.clone(), &FilterParams::default()), ranked);
    }

    #[test]
    fn filtering_is_idempotent(
        places in places(),
        origin in coordinate(),
        text in "[a-z]{0,3}",
        radius in prop::option::of(0.0f64..20_000.0),
        limit in prop::option::of(0usize..50),
    ) {
        let params = FilterParams { search_text: text, radius_km: radius, limit };
        let once = apply(rank(&places, Some(origin)), &params);
        let twice = apply(once.clone(), &params);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn text_and_radius_commute(
        places in places(),
        origin in coordinate(),
        text in "[a-z]{0,3}",
        radius in 0.0f64..20_000.0,
    ) {
        let ranked = rank(&places, Some(origin));
        let text_only = FilterParams::new().with_search_text(text.clone());
        let radius_only = FilterParams::new().with_radius_km(radius);

        let a = apply(apply(ranked.clone(), &text_only), &radius_only);
        let b = apply(apply(ranked, &radius_only), &text_only);
        prop_assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn view_is_bounded_by_limit(places in places(), limit in 0usize..50) {
        let view = apply(rank(&places, None), &FilterParams::new().with_limit(limit));
        prop_assert_eq!(view.len(), places.len().min(limit));
    }
}
