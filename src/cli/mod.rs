pub mod completions;
pub mod convert;
pub mod edit;
pub mod init;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::StudioConfig;
use crate::error::Result;

/// pixstudio - Pixel art conversion and grid editing
#[derive(Parser, Debug)]
#[command(name = "pixstudio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging (repeat for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image into palette-limited pixel art
    Convert(convert::ConvertArgs),

    /// Replay an edit script on a pixel grid
    Edit(edit::EditArgs),

    /// Initialize a pixstudio project (generates pixstudio.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load an explicit config file, or discover one in the current directory.
pub(crate) fn load_config(path: Option<&Path>) -> Result<StudioConfig> {
    match path {
        Some(path) => StudioConfig::load(path),
        None => StudioConfig::discover(Path::new(".")),
    }
}
