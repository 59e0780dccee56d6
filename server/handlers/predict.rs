use std::io::Read;

use serde::Deserialize;
use tiny_http::Request;

use ricescan::{decode_image, PredictionResult};

use crate::routes::{error_response, json_response, HttpResponse};
use crate::state::AppState;
use crate::util::fetch::validate_url;

/// Request bodies are a single URL; anything bigger is not a valid request.
const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub image_url: String,
}

/// A failed prediction request: HTTP status plus the `detail` text.
#[derive(Debug)]
pub struct Rejection {
    pub status: u16,
    pub detail: String,
}

impl Rejection {
    fn new(status: u16, detail: impl Into<String>) -> Self {
        Rejection { status, detail: detail.into() }
    }
}

pub fn parse_body(body: &[u8]) -> Result<PredictRequest, String> {
    serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))
}

// ---------------------------------------------------------------------------
// POST /predict/
// ---------------------------------------------------------------------------

pub fn handle(request: &mut Request, state: &AppState) -> HttpResponse {
    let mut body = Vec::new();
    if let Err(e) = Read::take(request.as_reader(), MAX_BODY_BYTES).read_to_end(&mut body) {
        return error_response(400, &format!("Could not read request body: {}", e));
    }
    match run(&body, state) {
        Ok(result)     => json_response(200, &result),
        Err(rejection) => error_response(rejection.status, &rejection.detail),
    }
}

/// Body → URL check → download → decode → prediction.
///
/// 422 bad body, 400 bad URL or failed download/decode, 500 inference failure.
pub fn run(body: &[u8], state: &AppState) -> Result<PredictionResult, Rejection> {
    let payload = parse_body(body).map_err(|detail| Rejection::new(422, detail))?;

    let image_url = payload.image_url;
    log::info!("Received prediction request for URL: {}", image_url);

    let url = validate_url(&image_url).map_err(|e| {
        log::error!("Invalid URL provided: {} ({})", image_url, e);
        Rejection::new(400, "Invalid URL provided")
    })?;

    let image = state
        .fetcher
        .fetch(&url)
        .and_then(|bytes| decode_image(&bytes))
        .map_err(|e| {
            log::error!("Error downloading image: {}", e);
            Rejection::new(400, format!("Error downloading image: {}", e))
        })?;
    log::info!("Image downloaded successfully, size: ({}, {})", image.width(), image.height());

    state.predictor.predict_image(&image).map_err(|e| {
        log::error!("Error during model prediction: {}", e);
        Rejection::new(500, format!("Error during model prediction: {}", e))
    })
}
