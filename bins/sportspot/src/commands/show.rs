//! `sportspot show <id>`

use super::lookup;
use crate::context::{AppContext, PositionArgs, SourceArgs};
use crate::output;
use anyhow::Result;
use sportspot_places::maps_url;

pub async fn run(
    ctx: &AppContext,
    id: &str,
    position: &PositionArgs,
    source: &SourceArgs,
) -> Result<()> {
    let (place, origin) = lookup(ctx, id, position, source).await?;
    let distance_km = origin.map(|o| o.distance_km(&place.coordinate));
    let favorite = ctx.favorites()?.is_favorite(&place.id).await?;

    if ctx.json {
        return output::print_json(&serde_json::json!({
            "place": place,
            "distance_km": distance_km,
            "favorite": favorite,
            "maps_url": maps_url(&place.coordinate),
        }));
    }

    output::print_place(&place, distance_km, favorite);
    Ok(())
}
