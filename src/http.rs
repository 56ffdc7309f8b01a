use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::handlers::{admin, hotels, sessions, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    // Public API routes.
    let pub_routes = Router::new()
        .route("/api/config", get(admin::get_config))
        .route("/api/hotels", get(hotels::search))
        .route(
            "/api/suggestions/destinations",
            get(hotels::suggest_destinations),
        )
        .route("/api/suggestions/hotels", get(hotels::suggest_hotels))
        .route("/hotel/{code}", get(hotels::select));

    // Search-bar sessions.
    let session_routes = Router::new()
        .route("/api/sessions", post(sessions::create))
        .route(
            "/api/sessions/{id}",
            get(sessions::get).delete(sessions::delete),
        )
        .route("/api/sessions/{id}/submit", post(sessions::submit))
        .route(
            "/api/sessions/{id}/{field}",
            axum::routing::put(sessions::input).delete(sessions::clear),
        )
        .route("/api/sessions/{id}/{field}/key", post(sessions::key))
        .route("/api/sessions/{id}/{field}/commit", post(sessions::commit))
        .route("/api/sessions/{id}/{field}/focus", post(sessions::focus))
        .route("/api/sessions/{id}/{field}/dismiss", post(sessions::dismiss));

    // Admin (requires auth).
    let admin_routes = Router::new()
        .route("/api/catalog", get(admin::get_catalog))
        .route("/api/catalog/reload", post(admin::reload_catalog))
        .route_layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

    Router::new()
        .merge(pub_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .with_state(ctx)
}

/// BasicAuth middleware checks for admin username & password defined in ctx constants.
async fn auth_middleware(
    State(ctx): State<Arc<Ctx>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if validate_basic_auth(
        request.headers(),
        &ctx.consts.admin_username,
        &ctx.consts.admin_password,
    ) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"hotelsearch\"")],
        "unauthorized",
    )
        .into_response()
}

/// Validate BasicAuth credentials from request headers.
/// Empty configured credentials never validate.
fn validate_basic_auth(headers: &header::HeaderMap, username: &str, password: &str) -> bool {
    if username.is_empty() || password.is_empty() {
        return false;
    }

    let check = || {
        let hdr = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let decoded = base64_decode(hdr.strip_prefix("Basic ")?).ok()?;
        let (user, pass) = decoded.split_once(':')?;
        Some(user == username && pass == password)
    };
    check().unwrap_or(false)
}

fn base64_decode(s: &str) -> Result<String, ()> {
    let bytes = STANDARD.decode(s).map_err(|_| ())?;
    String::from_utf8(bytes).map_err(|_| ())
}
