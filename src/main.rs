mod autocomplete;
mod catalog;
mod cli;
mod filter;
mod handlers;
mod http;
mod init;
mod intent;
mod models;
mod sessions;
mod suggest;

use std::sync::Arc;

use clap::Parser;

use catalog::Catalog;
use cli::Commands;
use handlers::{Consts, Ctx};
use sessions::Sessions;
use suggest::{Field, HotelNames, Source};

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Generate a new config file.
    if let Some(Commands::NewConfig { path }) = &cli.command {
        match init::generate_config(path) {
            Ok(_) => {
                log::info!("config file generated: {}", path.display());
            }
            Err(e) => {
                log::error!("error generating config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Load config.
    let config = init::init_config(&cli.config);

    // Load the hotel catalog. A failed fetch leaves an empty catalog.
    let source = match init::init_catalog_source(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("error initializing catalog source: {}", e);
            std::process::exit(1);
        }
    };
    let catalog = Arc::new(Catalog::new(source));
    catalog.load().await;

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        catalog,
        sessions: Sessions::new(
            config.app.max_sessions,
            config.search.max_suggestions,
            config.search.narrow_on_submit.unwrap_or(false),
        ),
        interpreter: init::init_interpreter(&config),

        // Global constants.
        consts: Consts {
            root_url: config.app.root_url,
            hotel_url: config.app.hotel_url,
            admin_username: config.app.admin_username,
            admin_password: config.app.admin_password,
            max_suggestions: config.search.max_suggestions,
            featured_hotels: filter::FEATURED_HOTELS,
            narrow_on_submit: config.search.narrow_on_submit.unwrap_or(false),
            location_keywords: config.search.location_keywords,
        },
        version: env!("VERSION").to_string(),
    });

    // One-off CLI commands.
    match cli.command {
        Some(Commands::Search { query }) => {
            print_json(&handlers::run_search(&ctx, &query));
            return;
        }

        Some(Commands::Suggest { field, text }) => {
            let snap = ctx.catalog.snapshot();
            let limit = ctx.consts.max_suggestions;
            let out = match Field::from(field) {
                Field::Destination => snap.destinations.suggest(&snap.hotels, &text, limit),
                Field::Hotel => HotelNames.suggest(&snap.hotels, &text, limit),
            };
            print_json(&out);
            return;
        }

        _ => {}
    }

    // Start the HTTP server.
    let routes = http::init_handlers(ctx.clone());
    let addr = config.app.address;

    log::info!("starting server v{} on {}", ctx.version, addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(v: &T) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            log::error!("error encoding output: {}", e);
            std::process::exit(1);
        }
    }
}
