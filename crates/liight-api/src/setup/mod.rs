//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use crate::telemetry::init_telemetry;
use anyhow::Result;
use axum::Router;
use liight_core::constants::UPLOADS_ROUTE;
use liight_core::Config;
use liight_services::{Mailer, NotificationDispatcher, SmtpMailer};
use liight_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Initialize the application from configuration: telemetry, upload storage,
/// the SMTP mailer and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config.validate()?;

    init_telemetry(config.is_production());
    tracing::info!(environment = %config.environment(), "Starting studio API");

    let storage = setup_storage(&config).await?;

    let mailer = SmtpMailer::from_settings(config.smtp())?;
    verify_mailer(&mailer).await;

    build_app(config, storage, Arc::new(mailer))
}

/// Assemble state and router from already-constructed backends.
pub fn build_app(
    config: Config,
    storage: Arc<dyn Storage>,
    mailer: Arc<dyn Mailer>,
) -> Result<(Arc<AppState>, Router)> {
    let notifier = Arc::new(NotificationDispatcher::new(mailer, config.admin_email()));
    let state = Arc::new(AppState::new(config.clone(), storage, notifier));
    let app = routes::setup_routes(&config, state.clone())?;
    Ok((state, app))
}

async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let base_url = format!("{}{}", config.public_base_url(), UPLOADS_ROUTE);
    let storage = LocalStorage::new(config.uploads_dir().clone(), base_url).await?;
    tracing::info!(path = %storage.base_path().display(), "Upload storage ready");
    Ok(Arc::new(storage))
}

/// Test the relay connection once at startup. A failure is logged, not fatal; sends
/// report their own errors.
async fn verify_mailer(mailer: &SmtpMailer) {
    match mailer.verify().await {
        Ok(true) => tracing::info!("SMTP relay reachable"),
        Ok(false) => tracing::warn!("SMTP relay did not accept the connection"),
        Err(e) => tracing::error!(error = %e, "SMTP relay verification failed"),
    }
}
