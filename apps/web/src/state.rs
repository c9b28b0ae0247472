use std::sync::Arc;

use crate::prediction_client::PredictionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable prediction transport. Default: `PredictionClient` over HTTP.
    pub predictor: Arc<dyn PredictionService>,
}
