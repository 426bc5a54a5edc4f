use std::sync::Arc;

use crate::services::charger_api::ChargerApi;

/// Shared by all requests. Read-only once built.
#[derive(Clone)]
pub struct AppState {
    pub chargers: Arc<dyn ChargerApi>,
}

impl AppState {
    pub fn new(chargers: impl ChargerApi + 'static) -> Self {
        Self {
            chargers: Arc::new(chargers),
        }
    }
}
