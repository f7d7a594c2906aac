use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// One label per line, in the order of the model's output scores.
    pub labels_path: PathBuf,
    /// (height, width) the network expects.
    pub input_shape: (u32, u32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("model.onnx"),
            labels_path: PathBuf::from("assets/labels.txt"),
            input_shape: (224, 224),
        }
    }
}
