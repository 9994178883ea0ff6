//! # Options and configuration
use std::{io, path::PathBuf};

use clap::Parser;
use glyphs::{
    lang::{LanguageDef, Languages},
    Theme,
};
use log::debug;
use serde::Deserialize;
use thiserror::*;

#[derive(Parser)]
/// Re-render recognized source code images with syntax highlighting
pub struct Options {
    /// A recognized grid (e.g. `Main.java.ron`) or a folder of them
    pub file: PathBuf,
    /// Where to store the output (default: `highlighted` next to the input)
    pub out: Option<PathBuf>,
    /// The language to highlight as.
    ///
    /// Defaults to the inner extension of the file name, `java` for
    /// `Main.java.ron`.
    #[clap(long, short = 'L')]
    pub lang: Option<String>,
    /// Don't highlight, draw every glyph in the default style
    #[clap(long)]
    pub plain: bool,
    /// The scanned source image, the output is at least as large
    #[clap(long = "source-image", short = 'S')]
    pub source_image: Option<PathBuf>,
    /// Theme and language definitions as a file
    #[clap(long, short = 'C')]
    pub config: Option<PathBuf>,
}

/// Failed to load the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// The file is not a valid configuration
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

/// The contents of a configuration file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Colors per token type, on top of the built-in ones
    #[serde(default)]
    pub theme: Theme,
    /// Additional languages, these take precedence over the built-in ones
    #[serde(default)]
    pub languages: Vec<LanguageDef>,
}

impl Config {
    /// The configured languages followed by the built-in ones
    pub fn languages(&self) -> Languages {
        let mut all = self.languages.clone();
        all.extend(Languages::builtin().0);
        Languages(all)
    }
}

impl Options {
    /// Load the configuration file, or the defaults if there is none
    pub fn config(&self) -> Result<Config, ConfigError> {
        if let Some(config_path) = &self.config {
            let text = std::fs::read_to_string(config_path)?;
            let config: Config = ron::from_str(&text)?;
            debug!("{:#?}", config);
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}
