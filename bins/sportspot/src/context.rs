//! Wiring from configuration and flags to the library types

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::{Args, ValueEnum};
use sportspot_api_client::{
    OverpassPlaces, OverpassQuery, SportspotClient, SupabasePlaces, SupabaseReviews,
};
use sportspot_core::config::Config;
use sportspot_geo::Coordinate;
use sportspot_places::{
    FileStore, FilterParams, JsonFavoritesStore, MemoryPlaceRepository, Place, PlaceRepository,
    SessionOptions, StaticLocationSource, WatchOptions,
};
use std::path::PathBuf;

/// Fixed position flags
#[derive(Args, Debug, Clone, Default)]
pub struct PositionArgs {
    /// Latitude of your position
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of your position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

/// Where places come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Supabase `places` table
    Supabase,
    /// OpenStreetMap via Overpass, around your position
    Overpass,
    /// A local JSON array of places
    File,
}

/// Place source flags
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Place source
    #[arg(long, value_enum, default_value_t = SourceKind::Supabase)]
    pub source: SourceKind,

    /// JSON file for `--source file`
    #[arg(long, required_if_eq("source", "file"))]
    pub places_file: Option<PathBuf>,
}

/// Any of the place sources the CLI can use
pub enum AnyRepository {
    Supabase(SupabasePlaces),
    Overpass(OverpassPlaces),
    File(MemoryPlaceRepository),
}

#[async_trait]
impl PlaceRepository for AnyRepository {
    async fn get_all(&self) -> sportspot_places::Result<Vec<Place>> {
        match self {
            Self::Supabase(r) => r.get_all().await,
            Self::Overpass(r) => r.get_all().await,
            Self::File(r) => r.get_all().await,
        }
    }

    async fn get_by_id(&self, id: &str) -> sportspot_places::Result<Place> {
        match self {
            Self::Supabase(r) => r.get_by_id(id).await,
            Self::Overpass(r) => r.get_by_id(id).await,
            Self::File(r) => r.get_by_id(id).await,
        }
    }
}

/// Loaded configuration plus global flags
pub struct AppContext {
    pub config: Config,
    pub json: bool,
}

impl AppContext {
    pub fn new(config: Config, json: bool) -> Self {
        Self { config, json }
    }

    /// Position from the flags, else from `[location]`, else none.
    pub fn origin(&self, position: &PositionArgs) -> Result<Option<Coordinate>> {
        let location = &self.config.schema.location;
        let pair = match (position.lat, position.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => location.latitude.zip(location.longitude),
        };
        let Some(coordinate) = pair.map(Coordinate::from) else {
            return Ok(None);
        };
        if !coordinate.is_valid() {
            bail!("position {coordinate} is outside latitude -90..90 / longitude -180..180");
        }
        Ok(Some(coordinate))
    }

    /// Location source answering with `origin`, or denying without one.
    pub fn location_source(&self, origin: Option<Coordinate>) -> StaticLocationSource {
        origin.map_or_else(StaticLocationSource::denied, StaticLocationSource::new)
    }

    /// Watch throttling from `[location]`
    pub fn watch_options(&self) -> WatchOptions {
        let location = &self.config.schema.location;
        WatchOptions {
            min_interval_ms: location.min_interval_ms,
            min_distance_m: location.min_distance_m,
        }
    }

    /// Supabase client from the environment
    pub fn client(&self) -> Result<SportspotClient> {
        SportspotClient::new().context("could not configure the Supabase client")
    }

    pub fn reviews(&self) -> Result<SupabaseReviews> {
        Ok(self.client()?.reviews())
    }

    pub async fn repository(
        &self,
        source: &SourceArgs,
        origin: Option<Coordinate>,
    ) -> Result<AnyRepository> {
        Ok(match source.source {
            SourceKind::Supabase => AnyRepository::Supabase(self.client()?.places()),
            SourceKind::Overpass => {
                let Some(center) = origin else {
                    bail!(
                        "the overpass source needs a position: \
                         pass --lat/--lng or set [location] in the config"
                    );
                };
                let overpass = &self.config.schema.overpass;
                let query = OverpassQuery {
                    endpoint: overpass.endpoint.clone(),
                    center,
                    radius_m: overpass.radius_m,
                    timeout_secs: overpass.timeout_secs,
                };
                AnyRepository::Overpass(self.client()?.overpass(query))
            }
            SourceKind::File => {
                let Some(ref path) = source.places_file else {
                    bail!("--source file needs --places-file");
                };
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("could not read {}", path.display()))?;
                let repository = MemoryPlaceRepository::from_json(&json)
                    .with_context(|| format!("{} is not a JSON array of places", path.display()))?;
                AnyRepository::File(repository)
            }
        })
    }

    pub fn favorites(&self) -> Result<JsonFavoritesStore<FileStore>> {
        let path = self.config.schema.favorites.resolved_path()?;
        Ok(JsonFavoritesStore::new(FileStore::new(path)))
    }

    /// Session options from `[search]`, with the list limit as the default
    /// filter limit.
    pub fn session_options(&self) -> SessionOptions {
        let search = &self.config.schema.search;
        SessionOptions {
            nearby_radius_km: search.nearby_radius_km,
            suggestion_limit: search.suggestion_limit,
            initial_params: FilterParams::new().with_limit(search.list_limit),
        }
    }
}
