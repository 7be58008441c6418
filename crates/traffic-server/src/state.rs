use traffic_core::PredictionService;

/// Shared, read-only application state built once at startup.
pub struct AppState {
    pub predictions: PredictionService,
}

impl AppState {
    pub fn new(predictions: PredictionService) -> Self {
        Self { predictions }
    }
}
