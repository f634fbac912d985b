//! Project configuration (pixstudio.yaml) parsing.
//!
//! Every field is optional; a missing file or an empty document yields the
//! defaults. Command-line flags take precedence over values loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::check_grid_size;
use crate::error::{Result, StudioError};
use crate::stylize::{PipelineOptions, QuantizationStrategy};
use crate::types::{Colour, Palette, DEFAULT_COLOURS};

/// File name looked up by `StudioConfig::discover`.
pub const CONFIG_FILENAME: &str = "pixstudio.yaml";

/// Settings loaded from pixstudio.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Output grid side length.
    pub grid_size: usize,

    /// Palette colours as hex strings.
    pub palette: Vec<Colour>,

    /// Shorthand for `pipeline.strategy`; wins when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<QuantizationStrategy>,

    /// Stylizer stage toggles.
    pub pipeline: PipelineOptions,

    /// Black background for new grids, erase and clear.
    pub dark_mode: bool,

    /// Integer upscale factor for PNG output.
    pub scale: u32,

    /// Maximum undo entries kept per session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            palette: DEFAULT_COLOURS.to_vec(),
            strategy: None,
            pipeline: PipelineOptions::default(),
            dark_mode: true,
            scale: 1,
            history_limit: None,
        }
    }
}

impl StudioConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StudioError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| StudioError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `pixstudio.yaml` from a directory, or defaults if absent.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Where `discover` looks in `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILENAME)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| StudioError::Parse {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// The configured palette.
    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.clone())
    }

    /// Pipeline options with the top-level `strategy` applied.
    pub fn pipeline(&self) -> PipelineOptions {
        let mut options = self.pipeline.clone();
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        options
    }

    fn validate(&self) -> Result<()> {
        check_grid_size(self.grid_size)?;
        if self.palette.is_empty() {
            return Err(StudioError::InvalidPalette);
        }
        if self.scale == 0 {
            return Err(StudioError::invalid_input("scale must be at least 1"));
        }
        Ok(())
    }
}
