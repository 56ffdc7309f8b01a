use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
    time::Duration,
};

use chrono::{DateTime, Local};
use reqwest::{header, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::{models::HotelRecord, suggest::Destinations};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog service returned {0}")]
    Status(StatusCode),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the hotel catalog comes from.
pub enum CatalogSource {
    Http {
        client: reqwest::Client,
        url: String,
        token: String,
    },
    File(PathBuf),
}

impl CatalogSource {
    pub fn http(url: &str, token: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::Http {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Http { url, .. } => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Fetch the full hotel list.
    pub async fn fetch(&self) -> Result<Vec<HotelRecord>, CatalogError> {
        match self {
            Self::Http { client, url, token } => {
                let mut req = client
                    .get(url)
                    .header(header::CONTENT_TYPE, "application/json");
                if !token.is_empty() {
                    req = req.bearer_auth(token);
                }

                let resp = req.send().await?;
                if !resp.status().is_success() {
                    return Err(CatalogError::Status(resp.status()));
                }
                Ok(decode_records(resp.json().await?))
            }

            Self::File(path) => {
                let content = tokio::fs::read_to_string(path).await?;
                Ok(decode_records(serde_json::from_str(&content)?))
            }
        }
    }
}

/// Decode records one at a time. Records that don't decode are logged and skipped.
fn decode_records(items: Vec<serde_json::Value>) -> Vec<HotelRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value(v) {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("skipping catalog record #{}: {}", i, e);
                None
            }
        })
        .collect()
}

/// Immutable view of the catalog as of one load.
pub struct Snapshot {
    pub hotels: Arc<Vec<HotelRecord>>,
    pub destinations: Destinations,
    pub loaded_at: DateTime<Local>,
    /// Why the last load failed, if it did. `hotels` is empty in that case.
    pub error: Option<String>,
}

impl Snapshot {
    pub fn new(hotels: Vec<HotelRecord>, error: Option<String>) -> Self {
        Self {
            destinations: Destinations::new(&hotels),
            hotels: Arc::new(hotels),
            loaded_at: Local::now(),
            error,
        }
    }
}

/// Catalog status for admin views.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub source: String,
    pub hotels: usize,
    pub loaded_at: DateTime<Local>,
    pub error: Option<String>,
}

/// Holds the current catalog snapshot. Only `load` replaces it.
pub struct Catalog {
    source: CatalogSource,
    current: RwLock<Arc<Snapshot>>,
    reload: tokio::sync::Mutex<()>,
}

impl Catalog {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(Snapshot::new(Vec::new(), None))),
            reload: tokio::sync::Mutex::new(()),
        }
    }

    /// Held across a reload and its delivery to sessions so that concurrent
    /// reloads can't leave sessions on a different snapshot than `current`.
    pub async fn lock_reload(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.reload.lock().await
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Fetch the catalog and swap it in. A failed fetch installs an empty
    /// catalog carrying the error instead of propagating it.
    pub async fn load(&self) -> Arc<Snapshot> {
        let snap = match self.source.fetch().await {
            Ok(hotels) => {
                log::info!(
                    "loaded {} hotels from {}",
                    hotels.len(),
                    self.source.describe()
                );
                Snapshot::new(hotels, None)
            }
            Err(e) => {
                log::error!("error loading catalog from {}: {}", self.source.describe(), e);
                Snapshot::new(Vec::new(), Some(e.to_string()))
            }
        };

        let snap = Arc::new(snap);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = snap.clone();
        snap
    }

    pub fn status(&self) -> CatalogStatus {
        let snap = self.snapshot();
        CatalogStatus {
            source: self.source.describe(),
            hotels: snap.hotels.len(),
            loaded_at: snap.loaded_at,
            error: snap.error.clone(),
        }
    }
}
