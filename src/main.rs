//! # Glyph tool
//!
//! Re-renders recognized pictures of source code with syntax highlighting.
use color_eyre::eyre;
use glyph_tool::cli::{self, highlight, opt::Options};

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    highlight::run(&opt)
}
