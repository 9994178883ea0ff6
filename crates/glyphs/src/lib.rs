#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Recognized source drawings
//!
//! This crate takes the output of an OCR pass over a picture of source code
//! (a grid of recognized glyphs, each with its own pixel mask) and turns it
//! back into an image, this time with syntax highlighting.
//!
//! The pipeline has two halves:
//!
//! 1. [`highlight`] maps the tokens of the reconstructed text back onto the
//!    glyph records they came from and stamps a color on each of them.
//! 2. [`raster::render_grid`] composites all colored glyph masks onto a fresh,
//!    white [`raster::Canvas`].
//!
//! Recognition and persistence are not part of this crate.

pub mod color;
pub mod grid;
pub mod highlight;
pub mod lang;
pub mod lex;
pub mod raster;

pub use color::Color;
pub use grid::{scan::ScannedImage, GlyphGrid, GlyphRecord, Mask};
pub use highlight::{highlight, highlight_with, AlignmentError};
pub use lex::{Theme, Token, TokenType, Tokenizer};
