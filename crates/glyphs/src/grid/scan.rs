//! # Reconstructed text and the `letter_at` resolver
//!
//! The recognition stage produces two views of the same image: the glyph
//! grid and a "pretty" string in which every row is terminated by a line
//! break. Line breaks have no glyph. After removing them, the characters of
//! the string and the glyphs of the grid (in reading order) correspond 1:1.
//!
//! [`ScannedImage`] owns both views and checks that correspondence once, on
//! construction. Afterwards every text offset is resolved through
//! [`ScannedImage::letter_at`].
use displaydoc::Display;
use thiserror::Error;

use super::{GlyphGrid, GlyphRecord};
use crate::highlight::AlignmentError;

/// Failed to resolve a text offset to a glyph
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum OffsetError {
    /// offset {offset} is out of range for a text of {len} chars
    OutOfRange {
        /// The requested offset
        offset: usize,
        /// The length of the text (in chars)
        len: usize,
    },
    /// offset {offset} is a line break, which has no glyph
    LineBreak {
        /// The requested offset
        offset: usize,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Slot {
    Break,
    Glyph { row: u32, col: usize },
}

/// A recognized image: the glyph grid and its reconstructed text
#[derive(Debug, Clone)]
pub struct ScannedImage {
    text: String,
    chars: Vec<char>,
    slots: Vec<Slot>,
    grid: GlyphGrid,
}

impl ScannedImage {
    /// Pair a reconstructed text with the grid it was derived from
    ///
    /// Fails if the non-line-break characters of `text` do not match the
    /// glyphs of `grid` one by one, in reading order.
    pub fn new(text: impl Into<String>, grid: GlyphGrid) -> Result<Self, AlignmentError> {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let glyph_count = grid.glyph_count();

        let mut positions = Vec::with_capacity(glyph_count);
        for (row, glyphs) in grid.rows() {
            for (col, glyph) in glyphs.iter().enumerate() {
                positions.push((row, col, glyph.letter));
            }
        }

        let mut slots = Vec::with_capacity(chars.len());
        let mut next = positions.iter();
        let mut glyph_index = 0;
        for (offset, &c) in chars.iter().enumerate() {
            if c == '\n' {
                slots.push(Slot::Break);
                continue;
            }
            let &(row, col, letter) = next.next().ok_or_else(|| AlignmentError::LengthMismatch {
                offset,
                text_chars: chars.iter().filter(|c| **c != '\n').count(),
                glyphs: glyph_count,
            })?;
            if letter == '\n' {
                return Err(AlignmentError::LineBreakGlyph { offset, row, col });
            }
            if letter != c {
                return Err(AlignmentError::CharMismatch {
                    offset,
                    text: c,
                    glyph: letter,
                });
            }
            slots.push(Slot::Glyph { row, col });
            glyph_index += 1;
        }
        if glyph_index != glyph_count {
            let offset = chars.len();
            if let Some(&(row, col, '\n')) = positions.get(glyph_index) {
                return Err(AlignmentError::LineBreakGlyph { offset, row, col });
            }
            return Err(AlignmentError::LengthMismatch {
                offset,
                text_chars: glyph_index,
                glyphs: glyph_count,
            });
        }

        Ok(Self {
            text,
            chars,
            slots,
            grid,
        })
    }

    /// Derive the reconstructed text from the grid
    ///
    /// Rows are joined with a line break, as the recognition stage does.
    pub fn from_grid(grid: GlyphGrid) -> Result<Self, AlignmentError> {
        let mut text = String::with_capacity(grid.glyph_count() + grid.row_count());
        for (index, (_, glyphs)) in grid.rows().enumerate() {
            if index > 0 {
                text.push('\n');
            }
            text.extend(glyphs.iter().map(|g| g.letter));
        }
        Self::new(text, grid)
    }

    /// The reconstructed text, with line breaks between rows
    pub fn pretty_string(&self) -> &str {
        &self.text
    }

    /// The length of the reconstructed text in chars
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    /// The character at a text offset
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The glyph grid
    pub fn grid(&self) -> &GlyphGrid {
        &self.grid
    }

    /// Give up the text view and return the grid
    pub fn into_grid(self) -> GlyphGrid {
        self.grid
    }

    fn slot(&self, offset: usize) -> Result<(u32, usize), OffsetError> {
        match self.slots.get(offset) {
            Some(Slot::Glyph { row, col }) => Ok((*row, *col)),
            Some(Slot::Break) => Err(OffsetError::LineBreak { offset }),
            None => Err(OffsetError::OutOfRange {
                offset,
                len: self.slots.len(),
            }),
        }
    }

    /// The glyph of the `offset`-th character of the reconstructed text
    pub fn letter_at(&self, offset: usize) -> Result<&GlyphRecord, OffsetError> {
        let (row, col) = self.slot(offset)?;
        let len = self.slots.len();
        self.grid
            .get(row, col)
            .ok_or(OffsetError::OutOfRange { offset, len })
    }

    /// The glyph of the `offset`-th character, mutably
    pub fn letter_at_mut(&mut self, offset: usize) -> Result<&mut GlyphRecord, OffsetError> {
        let (row, col) = self.slot(offset)?;
        let len = self.slots.len();
        self.grid
            .get_mut(row, col)
            .ok_or(OffsetError::OutOfRange { offset, len })
    }
}
