//! Bucketed nearest-colour lookup table.
//!
//! Source colours are reduced to `resolution` buckets per channel. Each
//! bucket stores the palette entry nearest (in LAB) to the bucket's centre,
//! so a query is a single table read instead of a palette scan. Colours
//! that share a bucket always resolve to the same entry.

use rayon::prelude::*;

use crate::error::{Result, StudioError};
use crate::types::{Colour, Palette};

use super::metric::{to_lab, Lab};

/// Default number of buckets per channel.
pub const DEFAULT_RESOLUTION: usize = 32;

/// Precomputed nearest-palette-entry table.
#[derive(Debug, Clone)]
pub struct PaletteIndex {
    palette: Palette,
    resolution: usize,
    step: usize,
    /// Palette positions, indexed by `(r * res + g) * res + b` bucket.
    table: Vec<u16>,
}

impl PaletteIndex {
    /// Build the table. Cost is `resolution^3 * palette.len()` distance
    /// evaluations; reuse the index across conversions that share a
    /// palette.
    ///
    /// `resolution` must be a power of two between 1 and 256.
    pub fn build(palette: &Palette, resolution: usize) -> Result<Self> {
        if !(1..=256).contains(&resolution) || !resolution.is_power_of_two() {
            return Err(StudioError::invalid_input(format!(
                "palette index resolution must be a power of two in 1..=256, got {}",
                resolution
            )));
        }
        if palette.len() > u16::MAX as usize {
            return Err(StudioError::invalid_input(format!(
                "palette has {} colours, at most {} are supported",
                palette.len(),
                u16::MAX
            )));
        }

        let step = 256 / resolution;
        let labs: Vec<Lab> = palette.iter().map(|&c| to_lab(c)).collect();

        let table: Vec<u16> = (0..resolution * resolution * resolution)
            .into_par_iter()
            .map(|bucket| {
                let b = bucket % resolution;
                let g = (bucket / resolution) % resolution;
                let r = bucket / (resolution * resolution);
                let centre = Colour::rgb(
                    bucket_centre(r, step),
                    bucket_centre(g, step),
                    bucket_centre(b, step),
                );
                nearest_lab(&to_lab(centre), &labs) as u16
            })
            .collect();

        tracing::debug!(
            colours = palette.len(),
            resolution,
            entries = table.len(),
            "built palette index"
        );

        Ok(Self {
            palette: palette.clone(),
            resolution,
            step,
            table,
        })
    }

    /// Palette position of the entry nearest to `colour`'s bucket.
    pub fn lookup_index(&self, colour: Colour) -> usize {
        let res = self.resolution;
        let r = colour.r as usize / self.step;
        let g = colour.g as usize / self.step;
        let b = colour.b as usize / self.step;
        self.table[(r * res + g) * res + b] as usize
    }

    /// Palette colour nearest to `colour`'s bucket.
    pub fn lookup(&self, colour: Colour) -> Colour {
        self.palette.colours()[self.lookup_index(colour)]
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

fn bucket_centre(bucket: usize, step: usize) -> u8 {
    (bucket * step + step / 2).min(255) as u8
}

/// Position of the nearest LAB entry; the first of equal minima wins.
fn nearest_lab(target: &Lab, labs: &[Lab]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, lab) in labs.iter().enumerate() {
        let dist = target.distance_sq(lab);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
