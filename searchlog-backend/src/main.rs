//! Searchlog backend: local JSON API for sites, hierarchical search logs,
//! memos and Markdown records.
//!
//! Default: http://127.0.0.1:5001/

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpServer};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod log_tree;
mod store;

use config::Config;
use db::Database;
use store::CsvRecordStore;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

/// Serve index.html for client-side routes the static handler doesn't know
async fn spa_fallback(req: HttpRequest) -> actix_web::Result<NamedFile> {
    let index = req
        .app_data::<web::Data<PathBuf>>()
        .map(|dir| dir.join("index.html"))
        .ok_or_else(|| actix_web::error::ErrorNotFound("frontend not configured"))?;
    Ok(NamedFile::open(index)?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Using data directory {}", config.data_dir.display());
    let store = match CsvRecordStore::new(&config.data_dir) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to open data directory {}: {}", config.data_dir.display(), e);
            std::process::exit(1);
        }
    };
    let db = Arc::new(Database::new(Arc::new(store)));
    if let Err(e) = db.init() {
        log::error!("Failed to initialize collections: {}", e);
        std::process::exit(1);
    }

    let frontend_dir = config.frontend_dir.clone().filter(|dir| {
        let exists = dir.join("index.html").exists();
        if !exists {
            log::warn!(
                "Frontend dir {} has no index.html - static file serving disabled",
                dir.display()
            );
        }
        exists
    });

    let bind_addr = config.bind_addr();
    log::info!("Starting searchlog server on http://{}", bind_addr);
    if let Some(dir) = &frontend_dir {
        log::info!("Serving frontend from: {}", dir.display());
    }

    let started_at = std::time::Instant::now();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        // The UI is served from the same origin or an embedded webview
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin.as_bytes().starts_with(b"http://127.0.0.1")
                    || origin.as_bytes().starts_with(b"http://localhost")
            })
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: app_config.clone(),
                started_at,
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::sites::config)
            .configure(controllers::logs::config)
            .configure(controllers::memos::config)
            .configure(controllers::records::config);

        if let Some(dir) = &frontend_dir {
            app = app.app_data(web::Data::new(dir.clone())).service(
                Files::new("/", dir.clone())
                    .index_file("index.html")
                    .default_handler(web::to(spa_fallback)),
            );
        }

        app
    })
    .bind(&bind_addr)?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("Failed to listen for Ctrl+C");
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
