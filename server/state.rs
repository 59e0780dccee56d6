use std::sync::Arc;

use ricescan::Predictor;

use crate::util::fetch::ImageFetcher;

/// Everything a request handler needs. Built once in `main`; read-only
/// afterwards, so no lock is taken per request.
pub struct AppState {
    pub predictor: Predictor,
    pub fetcher: ImageFetcher,
}

/// Shared state type: an `Arc<AppState>` passed to every handler.
pub type SharedState = Arc<AppState>;
