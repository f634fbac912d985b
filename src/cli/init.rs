//! Init command implementation.
//!
//! Writes a `pixstudio.yaml` holding every default so it can be edited in
//! place.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{StudioConfig, CONFIG_FILENAME};
use crate::error::{Result, StudioError};
use crate::output::{display_path, Printer};

/// Initialize a pixstudio project by generating pixstudio.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing pixstudio.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = StudioConfig::path_in(&args.path);

    if config_path.exists() && !args.force {
        return Err(StudioError::Parse {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    if !args.path.exists() {
        fs::create_dir_all(&args.path).map_err(|e| StudioError::Io {
            path: args.path.clone(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }

    let yaml = StudioConfig::default().to_yaml()?;
    fs::write(&config_path, yaml).map_err(|e| StudioError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));

    Ok(())
}
