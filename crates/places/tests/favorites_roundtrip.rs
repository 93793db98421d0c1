//! Favorites read back exactly as they were saved.

use proptest::prelude::*;
use sportspot_places::{
    Coordinate, FavoritesStore, FileStore, JsonFavoritesStore, MemoryStore, Place,
};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

proptest! {
    #[test]
    fn toggled_entries_reload_unchanged(coordinates in prop::collection::vec(coordinate(), 1..20)) {
        let store = JsonFavoritesStore::new(MemoryStore::new());
        let (returned, reloaded) = runtime().block_on(async {
            let mut returned = Vec::new();
            for (i, c) in coordinates.iter().enumerate() {
                let place = Place::new(i.to_string(), "Court", "tennis", *c);
                returned = store.toggle(&place).await.unwrap();
            }
            (returned, store.list().await.unwrap())
        });

        prop_assert_eq!(&reloaded, &returned);
        let saved: Vec<Coordinate> = reloaded.iter().map(|f| f.coordinate).collect();
        prop_assert_eq!(saved, coordinates);
    }
}

#[tokio::test]
async fn test_file_store_keeps_awkward_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let place = Place::new(
        "7",
        "Riverside Courts",
        "tennis",
        Coordinate::new(-3.4941826710914796, -111.97804110201159),
    );

    let saved = JsonFavoritesStore::new(FileStore::new(&path)).toggle(&place).await.unwrap();
    let reloaded = JsonFavoritesStore::new(FileStore::new(&path)).list().await.unwrap();

    assert_eq!(reloaded, saved);
    assert_eq!(reloaded[0].coordinate, place.coordinate);
}
