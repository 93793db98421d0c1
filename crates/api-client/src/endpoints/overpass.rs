//! Overpass interpreter (OpenStreetMap sports facilities)

use super::{id_string, text};
use crate::client::SportspotClient;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use sportspot_geo::{coordinate_from_fields, Coordinate};
use sportspot_places::{Place, PlaceError, PlaceRepository, Result};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Default public interpreter
pub const DEFAULT_ENDPOINT: &str = "https://overpass.kumi.systems/api/interpreter";

/// `leisure` values that count as sports facilities
const LEISURE_KINDS: &str = "stadium|sports_centre|fitness_centre|pitch|golf_course";

/// Where and how far to search.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    /// Interpreter URL
    pub endpoint: String,
    /// Search center
    pub center: Coordinate,
    /// Search radius in meters
    pub radius_m: u32,
    /// Server-side timeout in seconds
    pub timeout_secs: u64,
}

impl OverpassQuery {
    /// Query around `center` with the default endpoint, 15 km, 25 s.
    pub fn around(center: Coordinate) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            center,
            radius_m: 15_000,
            timeout_secs: 25,
        }
    }

    /// Overpass QL source for this query.
    pub fn to_ql(&self) -> String {
        format!(
            "[out:json][timeout:{}];\
             (node[\"leisure\"~\"{LEISURE_KINDS}\"](around:{},{},{}););out body;",
            self.timeout_secs, self.radius_m, self.center.latitude, self.center.longitude
        )
    }

    fn url(&self) -> std::result::Result<String, ApiError> {
        Url::parse_with_params(&self.endpoint, &[("data", self.to_ql())])
            .map(String::from)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.endpoint)))
    }
}

/// Place repository backed by an Overpass query.
///
/// The last fetched set is cached so that `get_by_id` does not repeat the
/// query.
pub struct OverpassPlaces {
    client: SportspotClient,
    query: OverpassQuery,
    cache: Mutex<Option<Vec<Place>>>,
}

impl OverpassPlaces {
    pub(crate) fn new(client: SportspotClient, query: OverpassQuery) -> Self {
        Self {
            client,
            query,
            cache: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<Vec<Place>> {
        let url = self.query.url()?;
        let body: Value = self.client.get_url(&url).await?;
        let places: Vec<Place> = body
            .get("elements")
            .and_then(Value::as_array)
            .map(|elements| elements.iter().filter_map(place_from_element).collect())
            .unwrap_or_default();
        debug!(count = places.len(), radius_m = self.query.radius_m, "overpass places");
        Ok(places)
    }
}

#[async_trait]
impl PlaceRepository for OverpassPlaces {
    #[instrument(skip(self), fields(center = %self.query.center))]
    async fn get_all(&self) -> Result<Vec<Place>> {
        let places = self.fetch().await?;
        *self.cache.lock().await = Some(places.clone());
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Place> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.fetch().await?);
        }
        cache
            .iter()
            .flatten()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))
    }
}

/// Builds a place from one `node` element.
pub(crate) fn place_from_element(element: &Value) -> Option<Place> {
    let id = element.get("id").and_then(id_string)?;
    let coordinate = coordinate_from_fields(element.get("lat")?, element.get("lon")?).ok()?;

    let tags = element.get("tags").unwrap_or(&Value::Null);
    let name = text(tags, "name").unwrap_or_else(|| "Unnamed".to_string());
    let category = text(tags, "leisure").unwrap_or_default();

    let mut place = Place::new(id, name, category, coordinate);
    place.address = text(tags, "addr:street");
    place.city = text(tags, "addr:city");
    place.opening_hours = text(tags, "opening_hours");
    place.phone = text(tags, "phone");
    Some(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ql() {
        let ql = OverpassQuery::around(Coordinate::new(13.75, 100.5)).to_ql();
        assert!(ql.starts_with("[out:json][timeout:25];"));
        let kinds = "stadium|sports_centre|fitness_centre|pitch|golf_course";
        assert!(ql.contains(&format!("node[\"leisure\"~\"{kinds}\"]")));
        assert!(ql.contains("(around:15000,13.75,100.5)"));
    }

    #[test]
    fn test_url_encodes_query() {
        let url = OverpassQuery::around(Coordinate::new(1.0, 2.0)).url().unwrap();
        let prefix = "https://overpass.kumi.systems/api/interpreter?data=%5Bout%3Ajson%5D";
        assert!(url.starts_with(prefix));
    }

    #[test]
    fn test_element_parsing() {
        let element = json!({
            "type": "node",
            "id": 4242,
            "lat": 13.7563,
            "lon": 100.5018,
            "tags": {"leisure": "pitch", "name": "Lumpini Court", "addr:city": "Bangkok"}
        });
        let place = place_from_element(&element).unwrap();
        assert_eq!(place.id, "4242");
        assert_eq!(place.name, "Lumpini Court");
        assert_eq!(place.category, "pitch");
        assert_eq!(place.city.as_deref(), Some("Bangkok"));
    }

    #[test]
    fn test_unnamed_node() {
        let place = place_from_element(&json!({"id": 1, "lat": 0.5, "lon": 0.5})).unwrap();
        assert_eq!(place.name, "Unnamed");
        assert!(place_from_element(&json!({"id": 2, "lat": 0.5})).is_none());
    }
}
