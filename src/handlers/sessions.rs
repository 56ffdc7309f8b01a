use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{json, run_search, ApiErr, ApiResp, Ctx, Result};
use crate::{
    models::SearchResults,
    suggest::{searchbar::BarState, Field, Key, SearchBar},
};

/// Session state after an event, plus the results of the search the event
/// triggered, if any.
#[derive(Serialize)]
pub struct SessionResp {
    pub id: Uuid,
    pub state: BarState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchResults>,
}

#[derive(Debug, Deserialize)]
pub struct InputReq {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyReq {
    pub key: Key,
}

#[derive(Debug, Deserialize)]
pub struct CommitReq {
    pub index: usize,
}

fn not_found() -> ApiErr {
    ApiErr::new("session not found", StatusCode::NOT_FOUND)
}

/// Apply an event to a session. If the event yields a query, run the search.
fn apply(
    ctx: &Ctx,
    id: Uuid,
    f: impl FnOnce(&mut SearchBar) -> Result<Option<String>>,
) -> Result<ApiResp<SessionResp>> {
    let (query, state) = ctx
        .sessions
        .with(&id, |bar| f(&mut *bar).map(|q| (q, bar.state())))
        .ok_or_else(not_found)??;

    let search = query.map(|q| {
        log::debug!("session {} searched for '{}'", id, q);
        run_search(ctx, &q)
    });

    Ok(json(SessionResp { id, state, search }))
}

/// Start a search-bar session over the current catalog.
pub async fn create(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<SessionResp>> {
    let snap = ctx.catalog.snapshot();
    let (id, state) = ctx.sessions.create(snap.hotels.clone());
    Ok(json(SessionResp {
        id,
        state,
        search: None,
    }))
}

pub async fn get(
    State(ctx): State<Arc<Ctx>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |_| Ok(None))
}

pub async fn delete(State(ctx): State<Arc<Ctx>>, Path(id): Path<Uuid>) -> Result<ApiResp<bool>> {
    if !ctx.sessions.remove(&id) {
        return Err(not_found());
    }
    Ok(json(true))
}

/// Keystroke: replace a field's text.
pub async fn input(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
    Json(req): Json<InputReq>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| {
        bar.on_input(field, &req.text);
        Ok(None)
    })
}

pub async fn clear(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| {
        bar.clear(field);
        Ok(None)
    })
}

pub async fn key(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
    Json(req): Json<KeyReq>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| Ok(bar.on_key(field, req.key)))
}

/// Click on a suggestion.
pub async fn commit(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
    Json(req): Json<CommitReq>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| {
        let s = bar
            .suggestions(field)
            .get(req.index)
            .cloned()
            .ok_or_else(|| ApiErr::new("unknown suggestion", StatusCode::BAD_REQUEST))?;
        Ok(bar.commit(field, &s))
    })
}

pub async fn focus(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| {
        bar.focus(field);
        Ok(None)
    })
}

/// Interaction outside the field's region.
pub async fn dismiss(
    State(ctx): State<Arc<Ctx>>,
    Path((id, field)): Path<(Uuid, Field)>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| {
        bar.dismiss(field);
        Ok(None)
    })
}

pub async fn submit(
    State(ctx): State<Arc<Ctx>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResp<SessionResp>> {
    apply(&ctx, id, |bar| Ok(bar.submit()))
}
