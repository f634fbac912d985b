use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pixstudio operations.
///
/// Every variant rejects a single requested operation; none leaves a grid
/// or history in a partially modified state.
#[derive(Error, Diagnostic, Debug)]
pub enum StudioError {
    #[error("Invalid palette: a palette needs at least one colour")]
    #[diagnostic(
        code(pixstudio::palette),
        help("Supply one or more colours, e.g. --palette \"#000000,#ffffff\"")
    )]
    InvalidPalette,

    #[error("Invalid input: {message}")]
    #[diagnostic(code(pixstudio::input))]
    InvalidInput { message: String },

    #[error("Cell ({x}, {y}) is outside the {size}x{size} grid")]
    #[diagnostic(code(pixstudio::bounds))]
    OutOfBounds { x: usize, y: usize, size: usize },

    #[error("Raster is {width}x{height} but the grid is {expected}x{expected}")]
    #[diagnostic(
        code(pixstudio::size),
        help("Stylize the image at the grid size before loading it")
    )]
    SizeMismatch {
        expected: usize,
        width: usize,
        height: usize,
    },

    #[error("Nothing to undo")]
    #[diagnostic(code(pixstudio::history))]
    NothingToUndo,

    #[error("Nothing to redo")]
    #[diagnostic(code(pixstudio::history))]
    NothingToRedo,

    #[error("IO error: {0}")]
    #[diagnostic(code(pixstudio::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pixstudio::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pixstudio::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl StudioError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
