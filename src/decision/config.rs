use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Confidence gate and ranking depth for `decide`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Minimum top-1 confidence, in percent, for a `success` verdict (inclusive).
    pub threshold_percent: f64,
    /// How many ranked entries to return.
    pub top_k: usize,
}

impl DecisionConfig {
    pub const DEFAULT_THRESHOLD: f64 = 75.0;
    pub const DEFAULT_TOP_K: usize = 3;

    pub fn new(threshold_percent: f64, top_k: usize) -> Result<Self> {
        let config = DecisionConfig { threshold_percent, top_k };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold_percent.is_finite() || !(0.0..=100.0).contains(&self.threshold_percent) {
            return Err(Error::InvalidThreshold(self.threshold_percent));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        DecisionConfig {
            threshold_percent: Self::DEFAULT_THRESHOLD,
            top_k: Self::DEFAULT_TOP_K,
        }
    }
}
