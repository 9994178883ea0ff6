//! # Glyph tool
//!
//! Command line shell around the [`glyphs`] crate.
#![warn(missing_docs)]

pub mod cli;
