//! Undo/redo history of full grid snapshots.

use std::sync::Arc;

use crate::error::{Result, StudioError};
use crate::types::Colour;

/// An immutable copy of a grid's cells at one point in time.
///
/// Cloning is cheap; the cell data is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    size: usize,
    cells: Arc<[Colour]>,
}

impl GridSnapshot {
    pub(crate) fn new(size: usize, cells: Vec<Colour>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self {
            size,
            cells: cells.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Colour] {
        &self.cells
    }
}

/// A linear history with a cursor.
///
/// Pushing after an undo discards every entry beyond the cursor, so an
/// edit made from an older state invalidates the old future.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<GridSnapshot>,
    /// Index of the current entry; meaningful only when `entries` is non-empty.
    cursor: usize,
    limit: Option<usize>,
}

impl HistoryStack {
    /// An unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` entries (minimum 1), dropping
    /// the oldest first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    /// Record a new current state.
    pub fn push(&mut self, snapshot: GridSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
                self.cursor -= excess;
            }
        }

        tracing::trace!(entries = self.entries.len(), cursor = self.cursor, "history push");
    }

    /// Step back one entry and return it.
    pub fn undo(&mut self) -> Result<&GridSnapshot> {
        if !self.can_undo() {
            return Err(StudioError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(&self.entries[self.cursor])
    }

    /// Step forward one entry and return it.
    pub fn redo(&mut self) -> Result<&GridSnapshot> {
        if !self.can_redo() {
            return Err(StudioError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&GridSnapshot> {
        self.entries.get(self.cursor)
    }

    /// Cursor position, or `None` while empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
