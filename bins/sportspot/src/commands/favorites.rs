//! `sportspot favorites`

use super::lookup;
use crate::context::{AppContext, PositionArgs, SourceArgs};
use crate::output::{self, Status};
use anyhow::Result;
use sportspot_places::{FavoriteEntry, FavoritesStore};

pub async fn list(ctx: &AppContext) -> Result<()> {
    let favorites = ctx.favorites()?.list().await?;
    show(ctx, &favorites)
}

pub async fn toggle(
    ctx: &AppContext,
    id: &str,
    position: &PositionArgs,
    source: &SourceArgs,
) -> Result<()> {
    let (place, _) = lookup(ctx, id, position, source).await?;
    let favorites = ctx.favorites()?.toggle(&place).await?;

    if !ctx.json {
        if favorites.iter().any(|f| f.id == place.id) {
            Status::success(&format!("Saved {}", place.name));
        } else {
            Status::success(&format!("Removed {}", place.name));
        }
    }
    show(ctx, &favorites)
}

pub async fn remove(ctx: &AppContext, id: &str) -> Result<()> {
    let store = ctx.favorites()?;
    let was_saved = store.is_favorite(id).await?;
    let favorites = store.remove(id).await?;

    if !ctx.json {
        if was_saved {
            Status::success(&format!("Removed #{id}"));
        } else {
            Status::info(&format!("#{id} was not saved"));
        }
    }
    show(ctx, &favorites)
}

fn show(ctx: &AppContext, favorites: &[FavoriteEntry]) -> Result<()> {
    if ctx.json {
        return output::print_json(&serde_json::to_value(favorites)?);
    }
    if favorites.is_empty() {
        Status::info("No saved places yet.");
    } else {
        Status::header("Saved places");
        output::print_favorites(favorites);
    }
    Ok(())
}
