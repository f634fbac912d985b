//! Editing sessions: one grid, its history and the drawing state.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StudioError};
use crate::types::{Colour, Raster};

use super::grid::{check_grid_size, PixelGrid};
use super::history::{GridSnapshot, HistoryStack};

/// Which mutation a pointer action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Draw,
    Erase,
    Fill,
}

impl FromStr for Tool {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "draw" | "pencil" => Ok(Tool::Draw),
            "erase" | "eraser" => Ok(Tool::Erase),
            "fill" | "bucket" => Ok(Tool::Fill),
            _ => Err(StudioError::Parse {
                message: format!("Unknown tool: {}", s),
                help: Some("Available tools: draw, erase, fill".to_string()),
            }),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Draw => write!(f, "draw"),
            Tool::Erase => write!(f, "erase"),
            Tool::Fill => write!(f, "fill"),
        }
    }
}

/// Background used by erase and clear.
pub fn background_for(dark_mode: bool) -> Colour {
    if dark_mode {
        Colour::BLACK
    } else {
        Colour::WHITE
    }
}

/// A single editing session.
///
/// Every operation that changes cell contents records exactly one history
/// entry. Operations that leave the grid as it was record nothing, so a
/// pointer drag repeatedly hitting the same cell adds one entry, not many.
/// This includes `clear` on an already blank grid and `load_raster` of
/// identical contents. `resize` always records an entry.
///
/// Grid sizes are limited to `GRID_SIZES`. A session is single-writer;
/// share it across threads only behind a lock.
#[derive(Debug, Clone)]
pub struct EditorSession {
    grid: PixelGrid,
    history: HistoryStack,
    tool: Tool,
    colour: Colour,
    dark_mode: bool,
}

impl EditorSession {
    /// Start a session with a blank grid, recorded as the first history
    /// entry.
    pub fn new(size: usize, dark_mode: bool) -> Result<Self> {
        Self::with_history(size, dark_mode, HistoryStack::new())
    }

    /// Like `new`, keeping at most `limit` history entries.
    pub fn with_history_limit(size: usize, dark_mode: bool, limit: usize) -> Result<Self> {
        Self::with_history(size, dark_mode, HistoryStack::with_limit(limit))
    }

    fn with_history(size: usize, dark_mode: bool, mut history: HistoryStack) -> Result<Self> {
        check_grid_size(size)?;
        let grid = PixelGrid::new(size, background_for(dark_mode))?;
        history.push(grid.snapshot());
        Ok(Self {
            grid,
            history,
            tool: Tool::default(),
            colour: Colour::rgb(0xff, 0x3e, 0x3e),
            dark_mode,
        })
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Switch the background used by later erase/clear operations.
    /// Existing cells are not repainted.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn background(&self) -> Colour {
        background_for(self.dark_mode)
    }

    /// Apply the current tool with the current colour at a cell.
    /// Returns whether the grid changed.
    pub fn apply(&mut self, x: usize, y: usize) -> Result<bool> {
        match self.tool {
            Tool::Draw => self.draw(x, y, self.colour),
            Tool::Erase => self.erase(x, y),
            Tool::Fill => Ok(self.fill(x, y, self.colour)),
        }
    }

    /// Paint one cell.
    pub fn draw(&mut self, x: usize, y: usize, colour: Colour) -> Result<bool> {
        let changed = self.grid.set_cell(x, y, colour)?;
        Ok(self.record(changed))
    }

    /// Reset one cell to the background.
    pub fn erase(&mut self, x: usize, y: usize) -> Result<bool> {
        let background = self.background();
        self.draw(x, y, background)
    }

    /// Flood fill from a cell. Out-of-bounds coordinates change nothing.
    pub fn fill(&mut self, x: usize, y: usize, colour: Colour) -> bool {
        let filled = self.grid.flood_fill(x, y, colour);
        self.record(filled > 0)
    }

    /// Reset every cell to the background.
    pub fn clear(&mut self) -> bool {
        let background = self.background();
        let changed = self.grid.initialize(background);
        self.record(changed)
    }

    /// Replace the grid with a blank one of a new size. Previous content
    /// is discarded, not resampled.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        check_grid_size(size)?;
        self.grid = PixelGrid::new(size, self.background())?;
        self.history.push(self.grid.snapshot());
        tracing::debug!(size, "resized grid");
        Ok(())
    }

    /// Load a grid-sized raster, e.g. a stylizer result.
    pub fn load_raster(&mut self, raster: &Raster) -> Result<bool> {
        let changed = self.grid.bulk_load(raster)?;
        Ok(self.record(changed))
    }

    /// Restore the previous history entry.
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.history.undo()?;
        self.grid = PixelGrid::from_snapshot(snapshot);
        Ok(())
    }

    /// Re-apply the next history entry.
    pub fn redo(&mut self) -> Result<()> {
        let snapshot = self.history.redo()?;
        self.grid = PixelGrid::from_snapshot(snapshot);
        Ok(())
    }

    /// Current grid contents as a raster.
    pub fn snapshot(&self) -> Raster {
        self.grid.to_raster()
    }

    /// Current grid contents as a history-style snapshot.
    pub fn grid_snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    fn record(&mut self, changed: bool) -> bool {
        if changed {
            self.history.push(self.grid.snapshot());
        }
        changed
    }
}
