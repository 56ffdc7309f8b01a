use std::sync::Arc;

use axum::extract::State;

use super::{json, ApiResp, Consts, Ctx, Result};
use crate::catalog::CatalogStatus;

/// Public app constants for the frontend.
pub async fn get_config(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Consts>> {
    Ok(json(ctx.consts.clone()))
}

pub async fn get_catalog(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<CatalogStatus>> {
    Ok(json(ctx.catalog.status()))
}

/// Re-fetch the catalog and hand it to every live session.
/// A failed fetch leaves an empty catalog and is reported in the status.
pub async fn reload_catalog(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<CatalogStatus>> {
    let _guard = ctx.catalog.lock_reload().await;
    let snap = ctx.catalog.load().await;
    ctx.sessions.set_catalog(&snap.hotels);
    Ok(json(ctx.catalog.status()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::CatalogSource, handlers::testutil, suggest::Field};

    #[tokio::test]
    async fn config_hides_credentials() {
        let ctx = testutil::ctx(false).await;
        let c = get_config(State(ctx)).await.unwrap().data.unwrap();
        let v = serde_json::to_value(&c).unwrap();
        assert!(v.get("admin_password").is_none());
        assert_eq!(v["max_suggestions"], 8);
    }

    #[tokio::test]
    async fn reload_failure_empties_catalog_and_sessions() {
        let ctx = testutil::ctx(false).await;
        let st = get_catalog(State(ctx.clone())).await.unwrap().data.unwrap();
        assert_eq!(st.hotels, 4);
        assert!(st.error.is_none());

        let (id, _) = ctx.sessions.create(ctx.catalog.snapshot().hotels.clone());
        ctx.sessions.with(&id, |bar| {
            bar.on_input(Field::Hotel, "fort");
        });

        // The temp catalog file is gone by now, so the reload fails.
        let st = reload_catalog(State(ctx.clone())).await.unwrap().data.unwrap();
        assert_eq!(st.hotels, 0);
        assert!(st.error.is_some());

        let n = ctx.sessions.with(&id, |bar| bar.suggestions(Field::Hotel).len());
        assert_eq!(n, Some(0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reloads_leave_sessions_on_current_catalog() {
        let f = testutil::hotels_file();
        let ctx = testutil::ctx_from(CatalogSource::File(f.path().to_path_buf()), false).await;
        let (id, _) = ctx.sessions.create(ctx.catalog.snapshot().hotels.clone());

        let reloads: Vec<_> = (0..8)
            .map(|_| tokio::spawn(reload_catalog(State(ctx.clone()))))
            .collect();
        for r in reloads {
            assert!(r.await.unwrap().is_ok());
        }

        let current = ctx.catalog.snapshot().hotels.as_ptr();
        let held = ctx.sessions.with(&id, |bar| bar.catalog().as_ptr()).unwrap();
        assert_eq!(held, current);
    }
}
