//! Application state shared by every handler.

use liight_core::Config;
use liight_services::NotificationDispatcher;
use liight_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<NotificationDispatcher>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            config,
            storage,
            notifier,
        }
    }
}
