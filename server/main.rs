/// ricescan server
///
/// JSON API that downloads a rice leaf photo from a URL, normalizes it,
/// runs the classifier and returns a ranked, confidence-gated diagnosis.
/// Served by a synchronous tiny_http server, one thread per request.
///
/// Run with:
///   cargo run --release -- --model trained_models/rice_disease.json
///
/// Routes:
///   GET  /         : service banner
///   GET  /health   : liveness
///   POST /predict/ : {"image_url": "..."} → prediction

mod config;
mod handlers;
mod routes;
mod state;
mod util;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use tiny_http::Server;

use ricescan::{Classifier, Network, Predictor};

use config::ServerConfig;
use state::AppState;
use util::fetch::{ImageFetcher, MAX_IMAGE_BYTES};

fn init_logging() {
    // default level is info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = ServerConfig::parse();

    let network = Network::load_json(&config.model)
        .with_context(|| format!("loading model from {}", config.model.display()))?;
    log::info!(
        "Model loaded successfully ({} layers, {} classes)",
        network.layers.len(),
        network.class_count()
    );
    if matches!(
        network.metadata.as_ref().and_then(|m| m.input_type.as_ref()),
        Some(ricescan::InputType::Numeric | ricescan::InputType::ImageGrayscale { .. })
    ) {
        return Err(anyhow!("model {} does not take RGB image input", config.model.display()));
    }

    let catalog  = config.load_catalog(&network)?;
    let target   = config.target_size(network.input_size());
    let decision = config.decision().context("invalid decision settings")?;
    log::info!(
        "Normalizing to {}x{}, threshold {}%, top-{}",
        target.width, target.height, decision.threshold_percent, decision.top_k
    );

    let predictor = Predictor::new(Arc::new(network), Arc::new(catalog), target, decision)?;
    let fetcher   = ImageFetcher::new(Duration::from_secs(config.fetch_timeout_secs), MAX_IMAGE_BYTES)?;
    let state     = Arc::new(AppState { predictor, fetcher });

    let addr   = config.bind_addr();
    let server = Server::http(&addr).map_err(|e| anyhow!("failed to bind {}: {}", addr, e))?;
    log::info!("Rice Disease Prediction API listening on http://{}", addr);

    // Downloads and inference block, so each request gets its own thread.
    for request in server.incoming_requests() {
        let state = state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }
    Ok(())
}
