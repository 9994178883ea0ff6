//! # Recognized grid files
//!
//! The recognition stage stores its result as RON:
//!
//! ```ron
//! (
//!     source: Some((640, 480)),
//!     grid: {
//!         0: [(letter: 'a', x: 10, y: 10, width: 5, height: 7, mask: Some([...]))],
//!     },
//! )
//! ```
use std::{
    io,
    path::{Path, PathBuf},
};

use glyphs::{AlignmentError, GlyphGrid, ScannedImage};
use serde::Deserialize;
use thiserror::*;

/// The extension of recognized grid files
pub const GRID_EXTENSION: &str = "ron";

/// Failed to load a grid file
#[derive(Debug, Error)]
pub enum ScanFileError {
    /// The file could not be read
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// The file is not a valid grid
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

/// One recognized image as stored by the recognition stage
#[derive(Debug, Deserialize)]
pub struct ScanFile {
    /// The reconstructed text, derived from the grid if missing
    #[serde(default)]
    pub text: Option<String>,
    /// The size of the scanned source image
    #[serde(default)]
    pub source: Option<(u32, u32)>,
    /// The recognized glyphs
    pub grid: GlyphGrid,
}

impl ScanFile {
    /// Read a grid file
    pub fn load(path: &Path) -> Result<Self, ScanFileError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Pair the grid with its text
    pub fn into_image(self) -> Result<ScannedImage, AlignmentError> {
        match self.text {
            Some(text) => ScannedImage::new(text, self.grid),
            None => ScannedImage::from_grid(self.grid),
        }
    }
}

/// The language extension in a grid file name, `java` for `Main.java.ron`
pub fn language_hint(path: &Path) -> Option<&str> {
    let stem = path.file_stem()?;
    Path::new(stem).extension()?.to_str()
}

/// The output file name, `Main.java.png` for `Main.java.ron`
pub fn output_name(path: &Path) -> PathBuf {
    let mut name = path.file_stem().unwrap_or(path.as_os_str()).to_owned();
    name.push(".png");
    PathBuf::from(name)
}

fn is_grid_file(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(GRID_EXTENSION))
}

/// The grid file at `path`, or all grid files below the folder `path`
pub fn find_inputs(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    if path.is_dir() {
        collect(path, &mut inputs)?;
        inputs.sort();
    } else {
        inputs.push(path.to_owned());
    }
    Ok(inputs)
}

fn collect(dir: &Path, inputs: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, inputs)?;
        } else if is_grid_file(&path) {
            inputs.push(path);
        }
    }
    Ok(())
}
