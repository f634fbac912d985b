//! Edit command implementation.
//!
//! Replays an edit script against a fresh session, optionally seeded from
//! a converted image, and writes the final grid.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::StudioConfig;
use crate::editor::{parse_script, EditorSession, PixelGrid};
use crate::error::{Result, StudioError};
use crate::output::{display_path, plural, Printer};
use crate::render::{load_raster, write_png};
use crate::stylize::{QuantizationStrategy, Stylizer};
use crate::types::Colour;

/// Replay an edit script on a pixel grid
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Script with one edit command per line
    pub script: PathBuf,

    /// Grid size: 16, 32, 64, 128, 256 or 512
    #[arg(long)]
    pub grid: Option<usize>,

    /// Seed the grid by converting this image first
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Output PNG path (default: <script>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the final grid as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Config file (default: ./pixstudio.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// JSON shape of a finished grid.
#[derive(Debug, Serialize)]
pub struct GridDocument<'a> {
    pub size: usize,
    pub dark_mode: bool,
    pub rows: Vec<&'a [Colour]>,
}

impl<'a> GridDocument<'a> {
    pub fn new(grid: &'a PixelGrid, dark_mode: bool) -> Self {
        Self {
            size: grid.size(),
            dark_mode,
            rows: grid.cells().chunks(grid.size()).collect(),
        }
    }
}

pub fn run(args: EditArgs, printer: &Printer) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let grid = args.grid.unwrap_or(config.grid_size);
    let mut session = new_session(&config, grid)?;

    if let Some(image) = &args.from {
        seed_from_image(&mut session, &config, image, printer)?;
    }

    let source = fs::read_to_string(&args.script).map_err(|e| StudioError::Io {
        path: args.script.clone(),
        message: format!("Failed to read script: {}", e),
    })?;
    let script = parse_script(&source)?;

    printer.status(
        "Replaying",
        &format!(
            "{} ({})",
            display_path(&args.script),
            plural(script.len(), "command", "commands")
        ),
    );

    let mut changes = 0;
    for entry in &script {
        match entry.command.apply(&mut session) {
            Ok(changed) => changes += usize::from(changed),
            Err(err @ (StudioError::NothingToUndo | StudioError::NothingToRedo)) => {
                printer.warning("Skipped", &format!("line {}: {}", entry.line, err));
            }
            Err(err) => {
                printer.error("Failed", &format!("line {}", entry.line));
                return Err(err);
            }
        }
    }
    tracing::debug!(changes, history = session.history().len(), "script finished");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.script.with_extension("png"));
    let scale = args.scale.unwrap_or(config.scale);
    write_png(&session.snapshot(), &output, scale)?;

    printer.success(
        "Wrote",
        &format!(
            "{} ({}, {})",
            display_path(&output),
            plural(changes, "change", "changes"),
            plural(session.history().len(), "history entry", "history entries")
        ),
    );

    if args.json {
        let document = GridDocument::new(session.grid(), session.dark_mode());
        let json = serde_json::to_string_pretty(&document).map_err(|e| StudioError::Parse {
            message: format!("Failed to serialize grid: {}", e),
            help: None,
        })?;
        println!("{}", json);
    }

    Ok(())
}

fn new_session(config: &StudioConfig, grid: usize) -> Result<EditorSession> {
    match config.history_limit {
        Some(limit) => EditorSession::with_history_limit(grid, config.dark_mode, limit),
        None => EditorSession::new(grid, config.dark_mode),
    }
}

/// Stylize an image at the session's grid size and load it as one edit.
/// Seeding always uses block averaging so the result matches the grid.
fn seed_from_image(
    session: &mut EditorSession,
    config: &StudioConfig,
    image: &std::path::Path,
    printer: &Printer,
) -> Result<()> {
    printer.status("Loading", &display_path(image));
    let source = load_raster(image)?;

    let mut options = config.pipeline();
    if options.strategy != QuantizationStrategy::BlockAverage {
        printer.info("Using", "block strategy to seed the grid");
        options.strategy = QuantizationStrategy::BlockAverage;
    }
    let stylizer = Stylizer::new(&config.palette()?, options)?;
    let raster = stylizer.stylize(&source, session.grid().size())?;
    session.load_raster(&raster)?;
    Ok(())
}
