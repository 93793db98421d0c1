//! Favorites list persisted through a string-keyed store.
//!
//! The whole list lives under [`FAVORITES_KEY`] as a JSON array of
//! [`FavoriteEntry`]. Toggles are read-modify-write, serialized by a lock so
//! two quick taps cannot lose each other's update.

use crate::error::Result;
use crate::place::{FavoriteEntry, Place};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Key under which the favorites array is stored.
pub const FAVORITES_KEY: &str = "favorites";

/// Minimal async string store (device key-value storage).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never set.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Favorites contract used by the presentation layer.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Current favorites in the order they were added.
    async fn list(&self) -> Result<Vec<FavoriteEntry>>;

    /// Add `place` if absent, remove it if present (by id). Returns the new
    /// full list.
    async fn toggle(&self, place: &Place) -> Result<Vec<FavoriteEntry>>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by one JSON object file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use `path`; parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&all)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// [`FavoritesStore`] over any [`KeyValueStore`].
#[derive(Debug)]
pub struct JsonFavoritesStore<S> {
    store: S,
    write_lock: tokio::sync::Mutex<()>,
}

impl<S: KeyValueStore> JsonFavoritesStore<S> {
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Whether `id` is in the list
    pub async fn is_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.load().await?.iter().any(|f| f.id == id))
    }

    /// Remove `id` if present. Returns the new full list.
    pub async fn remove(&self, id: &str) -> Result<Vec<FavoriteEntry>> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.load().await?;
        favorites.retain(|f| f.id != id);
        self.save(&favorites).await?;
        Ok(favorites)
    }

    async fn load(&self) -> Result<Vec<FavoriteEntry>> {
        match self.store.get(FAVORITES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, favorites: &[FavoriteEntry]) -> Result<()> {
        self.store.set(FAVORITES_KEY, serde_json::to_string(favorites)?).await
    }
}

#[async_trait]
impl<S: KeyValueStore> FavoritesStore for JsonFavoritesStore<S> {
    async fn list(&self) -> Result<Vec<FavoriteEntry>> {
        self.load().await
    }

    async fn toggle(&self, place: &Place) -> Result<Vec<FavoriteEntry>> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.load().await?;

        if let Some(pos) = favorites.iter().position(|f| f.id == place.id) {
            favorites.remove(pos);
            debug!(id = %place.id, "removed favorite");
        } else {
            favorites.push(FavoriteEntry::from_place(place, Utc::now()));
            debug!(id = %place.id, "added favorite");
        }

        self.save(&favorites).await?;
        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaceError;
    use sportspot_geo::Coordinate;

    fn gym() -> Place {
        Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.50)).with_city("Bangkok")
    }

    fn park() -> Place {
        Place::new("2", "North Park", "park", Coordinate::new(13.80, 100.50))
    }

    #[tokio::test]
    async fn test_double_toggle_restores_list() {
        let store = JsonFavoritesStore::new(MemoryStore::new());
        store.toggle(&park()).await.unwrap();
        let before = store.list().await.unwrap();

        let added = store.toggle(&gym()).await.unwrap();
        assert_eq!(added.len(), 2);
        assert!(store.is_favorite("1").await.unwrap());

        let after = store.toggle(&gym()).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_toggle_keys_by_id() {
        let store = JsonFavoritesStore::new(MemoryStore::new());
        store.toggle(&gym()).await.unwrap();

        let mut renamed = gym();
        renamed.name = "Central Gym (new wing)".to_string();
        assert!(store.toggle(&renamed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let store = JsonFavoritesStore::new(MemoryStore::new());
        store.toggle(&gym()).await.unwrap();
        assert_eq!(store.remove("nope").await.unwrap().len(), 1);
        assert!(store.remove("1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFavoritesStore::new(FileStore::new(&path));
        let saved = store.toggle(&gym()).await.unwrap();

        let reopened = JsonFavoritesStore::new(FileStore::new(&path));
        assert_eq!(reopened.list().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_coordinates_survive_reload_exactly() {
        let store = JsonFavoritesStore::new(MemoryStore::new());
        let awkward = [
            Coordinate::new(-3.4941826710914796, -111.97804110201159),
            Coordinate::new(0.1 + 0.2, 1.0 / 3.0),
            Coordinate::new(89.99999999999999, -179.99999999999997),
        ];
        for (i, coordinate) in awkward.into_iter().enumerate() {
            store
                .toggle(&Place::new(i.to_string(), "Court", "tennis", coordinate))
                .await
                .unwrap();
        }

        let saved: Vec<Coordinate> =
            store.list().await.unwrap().iter().map(|f| f.coordinate).collect();
        assert_eq!(saved, awkward);
    }

    #[tokio::test]
    async fn test_corrupt_store_surfaces_error() {
        let kv = MemoryStore::new();
        kv.set(FAVORITES_KEY, "{not json".to_string()).await.unwrap();
        let store = JsonFavoritesStore::new(kv);

        assert!(matches!(store.toggle(&gym()).await, Err(PlaceError::Storage(_))));
    }
}
