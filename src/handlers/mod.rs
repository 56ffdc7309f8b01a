pub mod admin;
pub mod hotels;
pub mod sessions;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    catalog::Catalog, filter, intent::Interpreter, models::Listing, models::SearchResults,
    sessions::Sessions,
};

/// Application context passed to all handlers.
pub struct Ctx {
    pub catalog: Arc<Catalog>,
    pub sessions: Sessions,
    pub interpreter: Interpreter,

    pub consts: Consts,
    pub version: String,
}

/// Application constants.
#[derive(Clone, Default, serde::Serialize)]
pub struct Consts {
    pub root_url: String,
    pub hotel_url: String,
    #[serde(skip)]
    pub admin_username: String,
    #[serde(skip)]
    pub admin_password: String,

    pub max_suggestions: usize,
    pub featured_hotels: usize,
    pub narrow_on_submit: bool,
    pub location_keywords: Vec<String>,
}

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Interpret a search string and filter the current catalog with it.
pub fn run_search(ctx: &Ctx, q: &str) -> SearchResults {
    let intent = ctx.interpreter.interpret(q);
    let snap = ctx.catalog.snapshot();
    let hotels: Vec<Listing> = filter::filter(&snap.hotels, &intent)
        .iter()
        .map(Listing::from)
        .collect();

    SearchResults {
        query: q.trim().to_string(),
        title: intent.title(),
        total: hotels.len(),
        intent,
        hotels,
        error: snap.error.clone(),
    }
}
