//! Subcommand implementations

pub mod favorites;
pub mod maps;
pub mod nearby;
pub mod reviews;
pub mod show;

use crate::context::{AppContext, PositionArgs, SourceArgs};
use anyhow::Result;
use sportspot_geo::Coordinate;
use sportspot_places::{Place, PlaceRepository};

/// Look up one place in the selected source, plus the origin if known.
async fn lookup(
    ctx: &AppContext,
    id: &str,
    position: &PositionArgs,
    source: &SourceArgs,
) -> Result<(Place, Option<Coordinate>)> {
    let origin = ctx.origin(position)?;
    let repository = ctx.repository(source, origin).await?;
    let place = repository.get_by_id(id).await?;
    Ok((place, origin))
}
