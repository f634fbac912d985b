//! The editable square colour grid.

use crate::error::{Result, StudioError};
use crate::types::{Colour, Raster};

use super::history::GridSnapshot;

/// Grid side lengths offered by the editor.
pub const GRID_SIZES: [usize; 6] = [16, 32, 64, 128, 256, 512];

/// Largest side length any grid may have.
pub const MAX_GRID_SIZE: usize = GRID_SIZES[GRID_SIZES.len() - 1];

/// Reject side lengths outside `GRID_SIZES`.
pub fn check_grid_size(size: usize) -> Result<()> {
    if GRID_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(StudioError::invalid_input(format!(
            "unsupported grid size {} (choose one of {:?})",
            size, GRID_SIZES
        )))
    }
}

/// A square grid of colours stored row-major (`y * size + x`).
///
/// The side length is fixed for the lifetime of the grid; changing size
/// means building a new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    size: usize,
    cells: Vec<Colour>,
}

impl PixelGrid {
    /// Create a `size`×`size` grid filled with `background`. Any side
    /// length from 1 to `MAX_GRID_SIZE` is accepted here; sessions restrict
    /// it further to `GRID_SIZES`.
    pub fn new(size: usize, background: Colour) -> Result<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(StudioError::invalid_input(format!(
                "grid size must be between 1 and {}, got {}",
                MAX_GRID_SIZE, size
            )));
        }
        Ok(Self {
            size,
            cells: vec![background; size * size],
        })
    }

    /// Rebuild a grid from a history snapshot.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Self {
        Self {
            size: snapshot.size(),
            cells: snapshot.cells().to_vec(),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell colours.
    pub fn cells(&self) -> &[Colour] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// Reset every cell to `background`. Returns whether anything changed.
    pub fn initialize(&mut self, background: Colour) -> bool {
        let changed = self.cells.iter().any(|&c| c != background);
        self.cells.fill(background);
        changed
    }

    /// Set one cell. Returns whether the colour changed.
    pub fn set_cell(&mut self, x: usize, y: usize, colour: Colour) -> Result<bool> {
        let i = self.index(x, y).ok_or(StudioError::OutOfBounds {
            x,
            y,
            size: self.size,
        })?;
        let changed = self.cells[i] != colour;
        self.cells[i] = colour;
        Ok(changed)
    }

    /// Recolour the 4-connected region sharing the colour at (x, y).
    ///
    /// Returns the number of recoloured cells. Coordinates outside the
    /// grid, or a replacement equal to the region's colour, recolour
    /// nothing. Uses an explicit worklist so region size is bounded only by
    /// memory, not stack depth.
    pub fn flood_fill(&mut self, x: usize, y: usize, replacement: Colour) -> usize {
        let Some(start) = self.index(x, y) else {
            return 0;
        };
        let target = self.cells[start];
        if target == replacement {
            return 0;
        }

        let size = self.size;
        let mut filled = 0;
        let mut stack = vec![start];
        self.cells[start] = replacement;

        while let Some(i) = stack.pop() {
            filled += 1;
            let (cx, cy) = (i % size, i / size);

            let mut visit = |n: usize| {
                if self.cells[n] == target {
                    // Recolouring on push marks the cell visited
                    self.cells[n] = replacement;
                    stack.push(n);
                }
            };
            if cx + 1 < size {
                visit(i + 1);
            }
            if cx > 0 {
                visit(i - 1);
            }
            if cy + 1 < size {
                visit(i + size);
            }
            if cy > 0 {
                visit(i - size);
            }
        }

        tracing::trace!(x, y, filled, "flood fill");
        filled
    }

    /// Replace every cell from a raster of exactly the grid's size.
    /// Returns whether anything changed.
    pub fn bulk_load(&mut self, raster: &Raster) -> Result<bool> {
        if raster.size() != (self.size, self.size) {
            return Err(StudioError::SizeMismatch {
                expected: self.size,
                width: raster.width(),
                height: raster.height(),
            });
        }

        let mut changed = false;
        for (cell, colour) in self.cells.iter_mut().zip(raster.pixels()) {
            changed |= *cell != colour;
            *cell = colour;
        }
        Ok(changed)
    }

    /// The grid as an opaque `size`×`size` raster.
    pub fn to_raster(&self) -> Raster {
        Raster::from_cells(self.size, self.size, &self.cells)
    }

    /// Immutable copy of the current cells.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.size, self.cells.clone())
    }

    /// One string of space-separated hex colours per row.
    pub fn rows_hex(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}
