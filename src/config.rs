use crate::error::Error;
use crate::image_classifier::models::model_config::ModelConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offset from UTC, in hours, used for log timestamps.
    pub logger_utc_offset_hours: i32,
    pub model: ModelConfig,
    pub content_path: PathBuf,
    /// Label universe of the fake classifier.
    pub fake_labels: Vec<String>,
    /// Character width of a full probability bar.
    pub probability_bar_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_utc_offset_hours: 0,
            model: ModelConfig::default(),
            content_path: PathBuf::from("assets/content.toml"),
            fake_labels: vec![
                "happy".to_string(),
                "sad".to_string(),
                "annoyed".to_string(),
            ],
            probability_bar_width: 30,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::Config(format!("failed to parse TOML: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn logger_timezone(&self) -> Result<chrono::FixedOffset, Error> {
        self.logger_utc_offset_hours
            .checked_mul(3600)
            .and_then(chrono::FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::Config(format!(
                    "logger_utc_offset_hours out of range: {}",
                    self.logger_utc_offset_hours
                ))
            })
    }
}
