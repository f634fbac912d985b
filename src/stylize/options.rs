//! Pipeline configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::quantize::DEFAULT_RESOLUTION;

/// How source pixels become palette colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantizationStrategy {
    /// Average the source over each of N×N cells, boost contrast, then
    /// map each cell through the palette index. Output is N×N.
    #[default]
    #[serde(rename = "block", alias = "block-average")]
    BlockAverage,
    /// Keep full resolution; force Sobel edges to black and map every
    /// other pixel to its nearest palette colour by RGB distance.
    #[serde(rename = "edges", alias = "edge-aware")]
    EdgeAware,
}

impl FromStr for QuantizationStrategy {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "block" | "block-average" => Ok(Self::BlockAverage),
            "edges" | "edge-aware" => Ok(Self::EdgeAware),
            _ => Err(StudioError::Parse {
                message: format!("Unknown quantization strategy: {}", s),
                help: Some("Use 'block' or 'edges'".to_string()),
            }),
        }
    }
}

impl fmt::Display for QuantizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizationStrategy::BlockAverage => write!(f, "block"),
            QuantizationStrategy::EdgeAware => write!(f, "edges"),
        }
    }
}

/// Stage toggles and tuning for a `Stylizer`.
///
/// Stages always run in the order denoise → sharpen → quantize (with
/// optional dithering) → scanlines → edge overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub strategy: QuantizationStrategy,

    /// 3x3 box blur before quantization.
    pub enable_denoise: bool,

    /// Sharpen kernel before quantization.
    pub enable_sharpen: bool,

    /// Floyd-Steinberg error diffusion during quantization.
    pub enable_dithering: bool,

    /// Darken every odd output row.
    pub enable_scanlines: bool,

    /// Black edge lines over block output. The edge-aware strategy always
    /// applies edges.
    pub enable_edge_overlay: bool,

    /// Sobel magnitude a pixel must exceed to count as an edge.
    pub edge_threshold: f32,

    /// Edge thickening; pixels within `edge_dilate_radius / 2` of an edge
    /// become edges.
    pub edge_dilate_radius: usize,

    /// Contrast multiplier applied to block averages.
    pub contrast: f32,

    /// Buckets per channel in the palette index.
    pub index_resolution: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            strategy: QuantizationStrategy::BlockAverage,
            enable_denoise: false,
            enable_sharpen: false,
            enable_dithering: false,
            enable_scanlines: true,
            enable_edge_overlay: false,
            edge_threshold: 100.0,
            edge_dilate_radius: 0,
            contrast: 1.1,
            index_resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl PipelineOptions {
    /// Options with every optional stage switched off.
    pub fn plain(strategy: QuantizationStrategy) -> Self {
        Self {
            strategy,
            enable_scanlines: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("block".parse::<QuantizationStrategy>().unwrap(), QuantizationStrategy::BlockAverage);
        assert_eq!("Edge-Aware".parse::<QuantizationStrategy>().unwrap(), QuantizationStrategy::EdgeAware);
        assert!("median".parse::<QuantizationStrategy>().is_err());
    }

    #[test]
    fn test_strategy_display_matches_parse() {
        for strategy in [QuantizationStrategy::BlockAverage, QuantizationStrategy::EdgeAware] {
            assert_eq!(strategy.to_string().parse::<QuantizationStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_options_yaml_defaults() {
        let options: PipelineOptions =
            serde_yaml::from_str("strategy: edges\nenable_dithering: true\n").unwrap();
        assert_eq!(options.strategy, QuantizationStrategy::EdgeAware);
        assert!(options.enable_dithering);
        assert!(options.enable_scanlines);
        assert_eq!(options.index_resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_plain_disables_stages() {
        let options = PipelineOptions::plain(QuantizationStrategy::BlockAverage);
        assert!(!options.enable_scanlines);
        assert!(!options.enable_dithering);
        assert!(!options.enable_denoise);
    }
}
