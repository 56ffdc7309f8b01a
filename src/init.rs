use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    catalog::{CatalogError, CatalogSource},
    intent::{Interpreter, DEFAULT_LOCATION_KEYWORDS, DEFAULT_MAX_NAME_TOKENS},
    models::{self, Config},
    suggest::DEFAULT_MAX_SUGGESTIONS,
};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "0.0.0.0:9000";
const DEFAULT_CATALOG_TIMEOUT: u64 = 10;
const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge one or more config files.
pub fn init_config(paths: &[PathBuf]) -> models::Config {
    let mut config: Option<models::Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        match read_config(path) {
            Ok(c) => {
                if let Some(ref mut existing) = config {
                    // Merge configs.
                    merge_config(existing, c);
                } else {
                    config = Some(c);
                }
            }
            Err(e) => {
                log::error!("error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let mut config = config.unwrap_or_else(|| {
        log::error!("no config files specified");
        std::process::exit(1);
    });
    apply_defaults(&mut config);
    config
}

/// Load configuration from TOML file.
fn read_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Fill unset values with their defaults.
fn apply_defaults(c: &mut Config) {
    if c.app.address.is_empty() {
        c.app.address = DEFAULT_ADDRESS.to_string();
    }
    if c.app.max_sessions == 0 {
        c.app.max_sessions = DEFAULT_MAX_SESSIONS;
    }
    if c.catalog.timeout == 0 {
        c.catalog.timeout = DEFAULT_CATALOG_TIMEOUT;
    }
    if c.search.location_keywords.is_empty() {
        c.search.location_keywords = DEFAULT_LOCATION_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect();
    }
    if c.search.max_suggestions == 0 {
        c.search.max_suggestions = DEFAULT_MAX_SUGGESTIONS;
    }
    if c.search.max_name_tokens == 0 {
        c.search.max_name_tokens = DEFAULT_MAX_NAME_TOKENS;
    }
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Merge the given src config into the dest config struct.
fn merge_config(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.root_url.is_empty() {
        dest.app.root_url = src.app.root_url;
    }
    if !src.app.hotel_url.is_empty() {
        dest.app.hotel_url = src.app.hotel_url;
    }
    if !src.app.admin_username.is_empty() {
        dest.app.admin_username = src.app.admin_username;
    }
    if !src.app.admin_password.is_empty() {
        dest.app.admin_password = src.app.admin_password;
    }
    if src.app.max_sessions > 0 {
        dest.app.max_sessions = src.app.max_sessions;
    }

    // Merge catalog config.
    if !src.catalog.url.is_empty() {
        dest.catalog.url = src.catalog.url;
    }
    if !src.catalog.token.is_empty() {
        dest.catalog.token = src.catalog.token;
    }
    if !src.catalog.file.is_empty() {
        dest.catalog.file = src.catalog.file;
    }
    if src.catalog.timeout > 0 {
        dest.catalog.timeout = src.catalog.timeout;
    }

    // Merge search config.
    if !src.search.location_keywords.is_empty() {
        dest.search.location_keywords = src.search.location_keywords;
    }
    if src.search.max_suggestions > 0 {
        dest.search.max_suggestions = src.search.max_suggestions;
    }
    if src.search.max_name_tokens > 0 {
        dest.search.max_name_tokens = src.search.max_name_tokens;
    }
    if src.search.narrow_on_submit.is_some() {
        dest.search.narrow_on_submit = src.search.narrow_on_submit;
    }
}

/// Pick the catalog source. A local file takes precedence over the URL.
pub fn init_catalog_source(config: &Config) -> Result<CatalogSource, CatalogError> {
    if !config.catalog.file.is_empty() {
        log::info!("catalog source: file {}", config.catalog.file);
        return Ok(CatalogSource::File(PathBuf::from(&config.catalog.file)));
    }

    if config.catalog.url.is_empty() {
        log::warn!("no catalog url or file configured");
    } else {
        log::info!("catalog source: {}", config.catalog.url);
    }

    CatalogSource::http(
        &config.catalog.url,
        &config.catalog.token,
        Duration::from_secs(config.catalog.timeout),
    )
}

/// Initialize the query interpreter from the search config.
pub fn init_interpreter(config: &Config) -> Interpreter {
    let it = Interpreter::new(
        config.search.location_keywords.iter().cloned(),
        config.search.max_name_tokens,
    );
    log::info!("location keywords: {}", it.keywords().join(", "));
    it
}
