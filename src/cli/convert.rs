//! Convert command implementation.
//!
//! Decodes an image, stylizes it into palette-limited pixel art and writes
//! the result as PNG.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::StudioConfig;
use crate::editor::check_grid_size;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::render::{load_raster, write_png};
use crate::stylize::{PipelineOptions, QuantizationStrategy, Stylizer};
use crate::types::{Colour, Palette};

/// Convert an image into palette-limited pixel art
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source image (any format the image crate decodes)
    pub input: PathBuf,

    /// Output PNG path (default: <input>-pixel.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output grid size: 16, 32, 64, 128, 256 or 512
    #[arg(long)]
    pub grid: Option<usize>,

    /// Quantization strategy: block or edges
    #[arg(long)]
    pub strategy: Option<QuantizationStrategy>,

    /// Box blur before quantization
    #[arg(long)]
    pub denoise: bool,

    /// Sharpen before quantization
    #[arg(long)]
    pub sharpen: bool,

    /// Floyd-Steinberg dithering
    #[arg(long)]
    pub dither: bool,

    /// Darken every other row
    #[arg(long, conflicts_with = "no_scanlines")]
    pub scanlines: bool,

    /// Disable scanlines
    #[arg(long)]
    pub no_scanlines: bool,

    /// Black edge overlay on block output
    #[arg(long)]
    pub edges: bool,

    /// Sobel magnitude threshold for edges
    #[arg(long)]
    pub edge_threshold: Option<f32>,

    /// Edge thickening radius
    #[arg(long)]
    pub edge_dilate: Option<usize>,

    /// Comma separated palette, e.g. "#000,#fff,#ff3e3e"
    #[arg(long)]
    pub palette: Option<String>,

    /// Extra colour appended to the palette
    #[arg(long)]
    pub colour: Option<Colour>,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Config file (default: ./pixstudio.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Grid size, palette and pipeline after applying flags over config.
    fn resolve(&self, config: &StudioConfig) -> Result<(usize, Palette, PipelineOptions)> {
        let grid = self.grid.unwrap_or(config.grid_size);
        check_grid_size(grid)?;

        let mut palette = match &self.palette {
            Some(list) => Palette::parse_list(list)?,
            None => config.palette()?,
        };
        if let Some(colour) = self.colour {
            palette = palette.with_custom(colour);
        }

        let mut options = config.pipeline();
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        options.enable_denoise |= self.denoise;
        options.enable_sharpen |= self.sharpen;
        options.enable_dithering |= self.dither;
        options.enable_edge_overlay |= self.edges;
        if self.scanlines {
            options.enable_scanlines = true;
        }
        if self.no_scanlines {
            options.enable_scanlines = false;
        }
        if let Some(threshold) = self.edge_threshold {
            options.edge_threshold = threshold;
        }
        if let Some(radius) = self.edge_dilate {
            options.edge_dilate_radius = radius;
        }

        Ok((grid, palette, options))
    }
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let (grid, palette, options) = args.resolve(&config)?;
    let scale = args.scale.unwrap_or(config.scale);

    printer.status("Loading", &display_path(&args.input));
    let source = load_raster(&args.input)?;

    let strategy = options.strategy;
    let stylizer = Stylizer::new(&palette, options)?;
    printer.status(
        "Stylizing",
        &format!(
            "{}x{} → {}x{} ({}, {} colours)",
            source.width(),
            source.height(),
            grid,
            grid,
            strategy,
            palette.len()
        ),
    );
    let result = stylizer.stylize(&source, grid)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));
    write_png(&result, &output, scale)?;

    printer.success(
        "Wrote",
        &format!(
            "{} ({}x{})",
            display_path(&output),
            result.width() * scale.max(1) as usize,
            result.height() * scale.max(1) as usize
        ),
    );

    Ok(())
}

/// `photo.jpg` → `photo-pixel.png` beside the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}-pixel.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudioError;
    use crate::types::Raster;
    use tempfile::tempdir;

    fn args(input: PathBuf) -> ConvertArgs {
        ConvertArgs {
            input,
            output: None,
            grid: None,
            strategy: None,
            denoise: false,
            sharpen: false,
            dither: false,
            scanlines: false,
            no_scanlines: false,
            edges: false,
            edge_threshold: None,
            edge_dilate: None,
            palette: None,
            colour: None,
            scale: None,
            config: None,
        }
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("shots/cat.jpeg")),
            PathBuf::from("shots/cat-pixel.png")
        );
    }

    #[test]
    fn test_flags_override_config() {
        let config = StudioConfig::parse("grid_size: 64\nstrategy: edges\n").unwrap();
        let mut convert = args(PathBuf::from("in.png"));
        convert.grid = Some(16);
        convert.strategy = Some(QuantizationStrategy::BlockAverage);
        convert.no_scanlines = true;
        convert.dither = true;
        convert.palette = Some("#000,#fff".to_string());
        convert.colour = Some(Colour::rgb(255, 0, 0));

        let (grid, palette, options) = convert.resolve(&config).unwrap();
        assert_eq!(grid, 16);
        assert_eq!(palette.len(), 3);
        assert_eq!(options.strategy, QuantizationStrategy::BlockAverage);
        assert!(!options.enable_scanlines);
        assert!(options.enable_dithering);
    }

    #[test]
    fn test_rejects_unsupported_grid() {
        let mut convert = args(PathBuf::from("in.png"));
        convert.grid = Some(20);
        assert!(convert.resolve(&StudioConfig::default()).is_err());
    }

    #[test]
    fn test_convert_writes_png() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("source.png");
        let source = Raster::filled(40, 40, Colour::rgb(250, 60, 60)).unwrap();
        write_png(&source, &input, 1).unwrap();

        let mut convert = args(input);
        convert.grid = Some(16);
        convert.scale = Some(2);
        run(convert, &Printer::new()).unwrap();

        let written = load_raster(&dir.path().join("source-pixel.png")).unwrap();
        assert_eq!(written.size(), (32, 32));
        assert_eq!(written.get(0, 0), Some(Colour::rgb(0xff, 0x3e, 0x3e)));
    }

    #[test]
    fn test_convert_rejects_overflowing_scale() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("source.png");
        write_png(&Raster::filled(40, 40, Colour::WHITE).unwrap(), &input, 1).unwrap();

        let mut convert = args(input);
        convert.grid = Some(16);
        convert.scale = Some(u32::MAX);
        let err = run(convert, &Printer::new()).unwrap_err();
        assert!(matches!(err, StudioError::InvalidInput { .. }));
        assert!(!dir.path().join("source-pixel.png").exists());
    }
}
