//! `sportspot maps <id>`

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
    let (place, _) = lookup(ctx, id, position, source).await?;
    let url = maps_url(&place.coordinate);

    if ctx.json {
        return output::print_json(&serde_json::json!({ "id": place.id, "url": url }));
    }
    println!("{url}");
    Ok(())
}
