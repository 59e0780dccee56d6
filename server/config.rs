use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use ricescan::{ClassCatalog, DecisionConfig, Network, TargetSize};

/// Command-line / environment configuration for the prediction server.
#[derive(Debug, Clone, Parser)]
#[command(name = "ricescan", version, about = "Rice leaf disease prediction API")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "RICESCAN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "RICESCAN_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Model weights (JSON) to load at startup.
    #[arg(long, env = "RICESCAN_MODEL", default_value = "trained_models/rice_disease.json")]
    pub model: PathBuf,

    /// Label catalog (JSON list or index map). Falls back to the model's
    /// output labels, then to the built-in rice disease labels.
    #[arg(long, env = "RICESCAN_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Minimum top-1 confidence, in percent, for a "success" verdict.
    #[arg(long, env = "RICESCAN_THRESHOLD", default_value_t = DecisionConfig::DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Number of ranked predictions returned.
    #[arg(long, env = "RICESCAN_TOP_K", default_value_t = DecisionConfig::DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Normalized image width. Defaults to the model's declared input, else 256.
    #[arg(long, env = "RICESCAN_INPUT_WIDTH")]
    pub input_width: Option<u32>,

    /// Normalized image height. Defaults to the model's declared input, else 256.
    #[arg(long, env = "RICESCAN_INPUT_HEIGHT")]
    pub input_height: Option<u32>,

    /// Timeout for downloading the image, in seconds.
    #[arg(long, env = "RICESCAN_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub fetch_timeout_secs: u64,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn decision(&self) -> ricescan::Result<DecisionConfig> {
        DecisionConfig::new(self.threshold, self.top_k)
    }

    /// Explicit flags win, then the model's declared input, then 256x256.
    pub fn target_size(&self, declared: Option<TargetSize>) -> TargetSize {
        let base = declared.unwrap_or_default();
        TargetSize::new(
            self.input_width.unwrap_or(base.width),
            self.input_height.unwrap_or(base.height),
        )
    }

    pub fn load_catalog(&self, network: &Network) -> anyhow::Result<ClassCatalog> {
        if let Some(path) = &self.catalog {
            let catalog = ClassCatalog::load_json(path)
                .with_context(|| format!("loading class catalog from {}", path.display()))?;
            log::info!("Loaded {} class labels from {}", catalog.len(), path.display());
            return Ok(catalog);
        }
        if let Some(labels) = network.output_labels() {
            log::info!("Using {} class labels from model metadata", labels.len());
            return Ok(ClassCatalog::from_labels(labels.iter().cloned()));
        }
        log::info!("Using built-in rice disease labels");
        Ok(ClassCatalog::rice_diseases())
    }
}
