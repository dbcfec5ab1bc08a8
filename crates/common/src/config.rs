use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors from loading a viewer configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reference size must be positive and finite, got {0}")]
    InvalidReferenceSize(f32),
}

/// Viewer settings. Every field has a default so a config file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Edge length of the axis planes; labels and the axes indicator scale with it.
    pub reference_size: f32,
    /// Delay between startup and the first animated frame.
    pub startup_delay_ms: u64,
    pub dark_theme: bool,
    /// TTF used for toolbar captions.
    pub font_path: PathBuf,
    /// Draw the spinning marker cube at the origin.
    pub show_marker: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            reference_size: 10.0,
            startup_delay_ms: 1000,
            dark_theme: false,
            font_path: PathBuf::from("assets/fonts/toolbar.ttf"),
            show_marker: false,
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl ViewerConfig {
    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load `path` when given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference_size.is_finite() || self.reference_size <= 0.0 {
            return Err(ConfigError::InvalidReferenceSize(self.reference_size));
        }
        Ok(())
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}
