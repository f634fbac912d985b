//! Grid editing: the cell grid, its history, sessions and edit scripts.

mod grid;
mod history;
mod script;
mod session;

pub use grid::{check_grid_size, PixelGrid, GRID_SIZES, MAX_GRID_SIZE};
pub use history::{GridSnapshot, HistoryStack};
pub use script::{parse_script, EditCommand, ScriptLine};
pub use session::{background_for, EditorSession, Tool};
