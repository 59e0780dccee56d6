use serde_json::json;

use crate::routes::{json_response, HttpResponse};

/// `GET /`
pub fn handle_root() -> HttpResponse {
    json_response(200, &json!({
        "message": "Rice Disease Prediction API",
        "status": "running",
    }))
}

/// `GET /health`
///
/// The model is loaded before the server binds, so a responding server
/// always has one.
pub fn handle_health() -> HttpResponse {
    json_response(200, &json!({
        "status": "healthy",
        "model_loaded": true,
    }))
}
