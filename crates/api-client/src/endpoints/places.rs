//! Supabase `places` table

use super::{id_string, text};
use crate::client::SportspotClient;
use async_trait::async_trait;
use serde_json::Value;
use sportspot_geo::{coordinate_from_fields, parse_coordinate, Coordinate};
use sportspot_places::{Place, PlaceError, PlaceRepository, Result};
use tracing::{debug, instrument, warn};

const TABLE: &str = "places";

/// Place repository over the Supabase REST API.
#[derive(Clone)]
pub struct SupabasePlaces {
    client: SportspotClient,
}

impl SupabasePlaces {
    pub(crate) fn new(client: SportspotClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaceRepository for SupabasePlaces {
    /// GET /rest/v1/places?select=*&order=name.asc
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Place>> {
        let url = self.client.rest_url(TABLE, &[("select", "*"), ("order", "name.asc")])?;
        let rows: Vec<Value> = self.client.get_url(&url).await?;
        let total = rows.len();

        let places: Vec<Place> = rows.iter().filter_map(place_from_row).collect();
        debug!(total, usable = places.len(), "fetched places");
        Ok(places)
    }

    /// GET /rest/v1/places?select=*&id=eq.<id>
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Place> {
        let filter = format!("eq.{id}");
        let url = self.client.rest_url(TABLE, &[("select", "*"), ("id", &filter)])?;
        let rows: Vec<Value> = self.client.get_url(&url).await?;

        rows.iter()
            .find_map(place_from_row)
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))
    }
}

/// Builds a place from a loosely typed row. Returns `None` (and logs) when
/// the row has no id or no usable coordinate.
pub(crate) fn place_from_row(row: &Value) -> Option<Place> {
    let Some(id) = row.get("id").and_then(id_string) else {
        warn!(%row, "skipping place row without id");
        return None;
    };

    let Some(coordinate) = row_coordinate(row) else {
        warn!(%id, "skipping place row without a usable coordinate");
        return None;
    };

    let name = text(row, "name").unwrap_or_else(|| "Unnamed".to_string());
    let category = text(row, "type")
        .or_else(|| text(row, "category"))
        .unwrap_or_default();

    let mut place = Place::new(id, name, category, coordinate);
    place.address = text(row, "address");
    place.city = text(row, "city");
    place.opening_hours = text(row, "opening_hours");
    place.phone = text(row, "phone");
    place.image_url = text(row, "image_url");
    Some(place)
}

fn row_coordinate(row: &Value) -> Option<Coordinate> {
    let lat = first_present(row, &["latitude", "lat"]);
    let lng = first_present(row, &["longitude", "lng", "lon"]);

    if let (Some(lat), Some(lng)) = (lat, lng) {
        return coordinate_from_fields(lat, lng).ok();
    }
    first_present(row, &["location", "coordinates", "geom"]).and_then(parse_coordinate)
}

fn first_present<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| row.get(*k))
        .filter(|v| !v.is_null())
}
