//! Selection settings

use crate::utils::error::FormatError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How to pick one format out of a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Mime type prefix to keep, e.g. "video" or "audio/webm"
    pub mime_type: Option<String>,

    /// Keep only formats with an audio track
    pub require_audio: bool,

    /// Preferred quality
    pub quality: QualityPreference,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            mime_type: None,
            require_audio: false,
            quality: QualityPreference::Best,
        }
    }
}

/// Quality preference options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPreference {
    /// Widest remaining format
    Best,
    /// Narrowest remaining format
    Worst,
    /// Quality or quality label, e.g. "medium" or "720p"
    Named(String),
    /// Source identifier
    Itag(i32),
}

impl QualityPreference {
    /// Get string representation for display
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreference::Best => "Best Available",
            QualityPreference::Worst => "Worst Available",
            QualityPreference::Named(_) => "Named Quality",
            QualityPreference::Itag(_) => "Specific Itag",
        }
    }
}

impl SelectionSettings {
    /// `<config dir>/ytformats/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ytformats").join("settings.json"))
    }

    /// Read settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        debug!("Loading selection settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that could never match anything useful
    pub fn validate(&self) -> Result<(), FormatError> {
        if matches!(self.mime_type.as_deref(), Some("")) {
            return Err(FormatError::InvalidSettings(
                "mime_type prefix must not be empty".to_string(),
            ));
        }
        if matches!(&self.quality, QualityPreference::Named(name) if name.is_empty()) {
            return Err(FormatError::InvalidSettings(
                "quality name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
