use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
};

use super::{json, run_search, ApiErr, ApiResp, Ctx, Result};
use crate::{
    models::SearchResults,
    suggest::{HotelNames, Source, Suggestion},
};

/// Free-text query params.
#[derive(Debug, serde::Deserialize, Default)]
pub struct TextQuery {
    #[serde(default)]
    pub q: String,
}

/// Search hotels with a free-text query. An empty query returns the featured hotels.
pub async fn search(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<TextQuery>,
) -> Result<ApiResp<SearchResults>> {
    Ok(json(run_search(&ctx, &query.q)))
}

/// Destination autocomplete over the full catalog.
pub async fn suggest_destinations(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<TextQuery>,
) -> Result<ApiResp<Vec<Suggestion>>> {
    let snap = ctx.catalog.snapshot();
    let out = snap
        .destinations
        .suggest(&snap.hotels, &query.q, ctx.consts.max_suggestions);
    Ok(json(out))
}

/// Hotel-name autocomplete over the full catalog.
pub async fn suggest_hotels(
    State(ctx): State<Arc<Ctx>>,
    Query(query): Query<TextQuery>,
) -> Result<ApiResp<Vec<Suggestion>>> {
    let snap = ctx.catalog.snapshot();
    let out = HotelNames.suggest(&snap.hotels, &query.q, ctx.consts.max_suggestions);
    Ok(json(out))
}

/// Hand a selected hotel over to the detail page.
pub async fn select(State(ctx): State<Arc<Ctx>>, Path(code): Path<i64>) -> Result<Redirect> {
    if ctx.consts.hotel_url.is_empty() {
        return Err(ApiErr::new(
            "hotel detail page not configured",
            StatusCode::NOT_FOUND,
        ));
    }

    log::info!("selected hotel {}", code);
    Ok(Redirect::to(&format!(
        "{}?hotelCode={}",
        ctx.consts.hotel_url, code
    )))
}
