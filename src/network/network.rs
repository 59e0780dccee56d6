use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::{InputType, ModelMetadata};
use crate::preprocess::TargetSize;

/// Feed-forward network loaded from a JSON weights file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    /// Input width of the first layer (0 for an empty network).
    pub fn input_len(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Output width of the last layer (0 for an empty network).
    pub fn output_len(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Image size declared in the metadata, if the model takes RGB images.
    pub fn image_input(&self) -> Option<TargetSize> {
        match self.metadata.as_ref()?.input_type.as_ref()? {
            InputType::ImageRgb { width, height } => Some(TargetSize::new(*width, *height)),
            _ => None,
        }
    }

    pub fn output_labels(&self) -> Option<&[String]> {
        self.metadata.as_ref()?.output_labels.as_deref()
    }

    /// Checks that consecutive layers chain and that every layer is
    /// internally consistent.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.layers.is_empty() {
            return Err("model has no layers".to_owned());
        }
        let mut expected_in = self.input_len();
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(reason) = layer.shape_error() {
                return Err(format!("layer {}: {}", i, reason));
            }
            if layer.input_size() != expected_in {
                return Err(format!(
                    "layer {} expects {} inputs but the previous layer produces {}",
                    i, layer.input_size(), expected_in
                ));
            }
            expected_in = layer.size;
        }
        if let Some(InputType::ImageRgb { width, height }) =
            self.metadata.as_ref().and_then(|m| m.input_type.as_ref())
        {
            let declared = *width as usize * *height as usize * 3;
            if declared != self.input_len() {
                return Err(format!(
                    "metadata declares a {}x{} RGB input ({} values) but the first layer takes {}",
                    width, height, declared, self.input_len()
                ));
            }
        }
        Ok(())
    }

    /// Forward pass over one flattened sample.
    ///
    /// Networks built in code or deserialized without `load_json` may be
    /// malformed, so shapes are checked here before any matrix op runs.
    pub fn forward(&self, input: Vec<f64>) -> Result<Vec<f64>> {
        self.validate().map_err(Error::Classifier)?;
        if input.len() != self.input_len() {
            return Err(Error::Classifier(format!(
                "input length mismatch: model expects {} values, got {}",
                self.input_len(), input.len()
            )));
        }
        let mut current = input;
        for layer in &self.layers {
            current = layer.forward(current);
        }
        Ok(current)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }

    /// Deserializes and validates a network from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let path = path.as_ref();
        let load_err = |reason: String| Error::ModelLoad { path: path.to_path_buf(), reason };

        let file = std::fs::File::open(path).map_err(|e| load_err(e.to_string()))?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)
            .map_err(|e| load_err(e.to_string()))?;
        network.validate().map_err(load_err)?;
        Ok(network)
    }
}
