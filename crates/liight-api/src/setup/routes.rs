//! Router assembly

use crate::constants::{
    CONNECTIVITY_PATH, DONATION_PATH, HEALTH_PATH, INQUIRY_JSON_PATH, INQUIRY_UPLOAD_PATH,
    MAX_REQUEST_BODY_BYTES,
};
use crate::handlers::{donation, health, inquiry_json, inquiry_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use liight_core::constants::UPLOADS_ROUTE;
use liight_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api_routes = Router::new()
        .route(INQUIRY_UPLOAD_PATH, post(inquiry_upload::submit_inquiry_with_pdf))
        .route(INQUIRY_JSON_PATH, post(inquiry_json::send_project_inquiry))
        .route(DONATION_PATH, post(donation::send_donation))
        .route(CONNECTIVITY_PATH, get(health::connectivity_check));

    let app = Router::new()
        .route(HEALTH_PATH, get(health::health_check))
        .merge(api_routes)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(config.uploads_dir()))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs(),
                ))),
        )
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
