//! # The glyph grid
//!
//! This is the data handed over by the recognition stage: every recognized
//! character occurrence with its position, size and pixel mask, sorted into
//! rows in reading order.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;

mod mask;
pub mod scan;

pub use mask::{Mask, RaggedMaskError};

/// The character that marks a blank (non-rendering) glyph
pub const BLANK: char = ' ';

/// One recognized character occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRecord {
    /// The recognized character
    pub letter: char,
    /// Horizontal position of the top left corner (in pixels)
    pub x: u32,
    /// Vertical position of the top left corner (in pixels)
    pub y: u32,
    /// The width of the glyph box
    pub width: u32,
    /// The height of the glyph box
    ///
    /// The mask has one row more than this, see [`GlyphRecord::expected_mask_size`].
    pub height: u32,
    /// The foreground pixels, `None` for placeholders such as spaces
    #[serde(default)]
    pub mask: Option<Mask>,
    /// The display color, `None` until highlighted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl GlyphRecord {
    /// Create a new glyph record without mask or color
    pub fn new(letter: char, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            letter,
            x,
            y,
            width,
            height,
            mask: None,
            color: None,
        }
    }

    /// Attach a pixel mask
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Whether this is a blank glyph that never contributes pixels
    pub fn is_blank(&self) -> bool {
        self.letter == BLANK
    }

    /// Whether the compositor draws this glyph, i.e. it has a color and is
    /// not blank
    pub fn is_drawn(&self) -> bool {
        !self.is_blank() && self.color.is_some()
    }

    /// The `(columns, rows)` a well-formed mask of this glyph has
    ///
    /// Masks carry one row below the declared height, the baseline overhang
    /// of descenders.
    pub fn expected_mask_size(&self) -> (u32, u32) {
        (self.width, self.height.saturating_add(1))
    }

    /// Whether the mask (if any) matches the declared size
    pub fn mask_matches(&self) -> bool {
        match &self.mask {
            Some(mask) => (mask.width(), mask.height()) == self.expected_mask_size(),
            None => true,
        }
    }
}

/// The row-major collection of all glyphs of one recognized image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphGrid {
    rows: BTreeMap<u32, Vec<GlyphRecord>>,
}

impl GlyphGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a glyph to the end of a row
    pub fn push(&mut self, row: u32, glyph: GlyphRecord) {
        self.rows.entry(row).or_default().push(glyph);
    }

    /// Iterate over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[GlyphRecord])> + '_ {
        self.rows.iter().map(|(k, v)| (*k, &v[..]))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate over all glyphs in reading order
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphRecord> + '_ {
        self.rows.values().flatten()
    }

    /// Iterate mutably over all glyphs in reading order
    pub fn glyphs_mut(&mut self) -> impl Iterator<Item = &mut GlyphRecord> + '_ {
        self.rows.values_mut().flatten()
    }

    /// The total number of glyphs
    pub fn glyph_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    /// The glyph at column `col` of row `row`
    pub fn get(&self, row: u32, col: usize) -> Option<&GlyphRecord> {
        self.rows.get(&row)?.get(col)
    }

    /// The glyph at column `col` of row `row`, mutably
    pub fn get_mut(&mut self, row: u32, col: usize) -> Option<&mut GlyphRecord> {
        self.rows.get_mut(&row)?.get_mut(col)
    }

    /// Remove every stamped color
    pub fn clear_colors(&mut self) {
        for glyph in self.glyphs_mut() {
            glyph.color = None;
        }
    }
}
