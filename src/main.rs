mod advice;
mod calendar;
mod config;
mod errors;
mod profile;
mod server;
mod state;

use crate::calendar::CalendarStore;
use crate::profile::JsonProfileStore;
use crate::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("matchbook advice service starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    // Load read-only stores (calendars + user profiles)
    let calendars = match CalendarStore::load(&cfg.data_dir, &cfg.championships) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("calendar load error: {e}");
            std::process::exit(1);
        }
    };

    let profiles = match JsonProfileStore::load(&cfg.user_database) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("user database error: {e}");
            std::process::exit(1);
        }
    };

    let port = cfg.server_port;
    let app_state = AppState::new(cfg, calendars, Arc::new(profiles));

    let app = axum::Router::new()
        .route("/api/health", axum::routing::get(server::routes::health))
        .route(
            "/api/championships",
            axum::routing::get(server::routes::get_championships),
        )
        .route(
            "/api/championship/{championship}/calendar",
            axum::routing::get(server::routes::get_calendar),
        )
        .route("/api/predict", axum::routing::post(server::routes::post_predict))
        .route("/api/advice", axum::routing::post(server::routes::post_advice))
        .route(
            "/api/counters",
            axum::routing::get(server::routes::get_counters),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(app_state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
