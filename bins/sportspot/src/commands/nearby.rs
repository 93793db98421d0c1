//! `sportspot nearby`

use crate::context::{AppContext, PositionArgs, SourceArgs};
use crate::output::{self, Status};
use anyhow::Result;
use sportspot_places::Session;
use sportspot_telemetry::{metrics, Timer};
use tracing::debug;

/// Filter flags of the nearby command
pub struct Filters {
    pub search: Option<String>,
    pub nearby: bool,
    pub limit: Option<usize>,
}

pub async fn run(
    ctx: &AppContext,
    position: &PositionArgs,
    source: &SourceArgs,
    filters: Filters,
) -> Result<()> {
    let origin = ctx.origin(position)?;
    let repository = ctx.repository(source, origin).await?;
    let session =
        Session::with_options(ctx.location_source(origin), repository, ctx.session_options());

    // Position updates land in the session for as long as the list is shown.
    let watch = match origin {
        Some(_) => Some(session.watch_location(ctx.watch_options()).await?),
        None => None,
    };
    debug!(watching = watch.is_some(), "position watch");

    let mut params = session.params();
    if let Some(ref text) = filters.search {
        params.search_text = text.clone();
    }
    if let Some(limit) = filters.limit {
        params.limit = Some(limit);
    }
    session.set_filter_params(params);
    if filters.nearby {
        session.toggle_nearby();
    }

    let spinner = (!ctx.json).then(|| output::spinner("Finding sports places..."));
    let timer = Timer::start("refresh");
    let status = session.refresh().await;
    timer.stop();
    metrics().increment("refresh");
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let view = session.view();
    metrics().increment_by("places.shown", view.len() as u64);

    if ctx.json {
        return output::print_json(&serde_json::json!({
            "status": status,
            "places": view,
        }));
    }

    if let Some(ref error) = status.error {
        Status::warning(&error.message);
    }
    if origin.is_none() {
        Status::info("No position given; places are listed in source order.");
    }

    if view.is_empty() {
        Status::info("No places match.");
        let suggestions = filters
            .search
            .as_deref()
            .map(|q| session.suggestions(q))
            .unwrap_or_default();
        if !suggestions.is_empty() {
            Status::header("Outside your filter");
            output::print_places(&suggestions);
        }
        return Ok(());
    }

    let title = if session.is_nearby() {
        "Nearby sports places"
    } else {
        "Sports places"
    };
    Status::header(title);
    output::print_places(&view);
    if let Some(watch) = watch {
        watch.dispose();
    }
    Ok(())
}
