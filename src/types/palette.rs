//! Ordered colour palettes.

use crate::error::{StudioError, Result};

use super::Colour;

/// The built-in drawing palette.
pub const DEFAULT_COLOURS: [Colour; 6] = [
    Colour::rgb(0xff, 0x3e, 0x3e), // red
    Colour::rgb(0xff, 0xd7, 0x00), // gold
    Colour::rgb(0x1a, 0x1b, 0x4b), // navy
    Colour::rgb(0xff, 0xff, 0xff), // white
    Colour::rgb(0x00, 0x00, 0x00), // black
    Colour::rgb(0x4a, 0x4a, 0x4a), // grey
];

/// An ordered, non-empty list of allowed output colours.
///
/// Order matters: when two entries are equally close to a colour, the
/// earlier one wins. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    /// Create a palette, rejecting an empty colour list.
    pub fn new(colours: Vec<Colour>) -> Result<Self> {
        if colours.is_empty() {
            return Err(StudioError::InvalidPalette);
        }
        Ok(Self { colours })
    }

    /// Parse a palette from hex strings.
    pub fn from_hex_list<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let colours = values
            .iter()
            .map(|v| Colour::from_hex(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colours)
    }

    /// Parse a comma separated list such as `"#000,#fff"`.
    pub fn parse_list(s: &str) -> Result<Self> {
        let values: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        Self::from_hex_list(&values)
    }

    /// The built-in six colour palette.
    pub fn default_palette() -> Self {
        Self {
            colours: DEFAULT_COLOURS.to_vec(),
        }
    }

    /// Append a user-chosen colour unless it is already present.
    pub fn with_custom(mut self, colour: Colour) -> Self {
        if !self.contains(colour) {
            self.colours.push(colour);
        }
        self
    }

    /// Check whether a colour is one of the entries.
    pub fn contains(&self, colour: Colour) -> bool {
        self.colours.contains(&colour)
    }

    /// All entries in order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn iter(&self) -> impl Iterator<Item = &Colour> {
        self.colours.iter()
    }

    /// Number of entries (always at least one).
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_palette()
    }
}
