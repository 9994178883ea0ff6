//! # Shared command line plumbing
use env_logger::Env;
use log::LevelFilter;

pub mod highlight;
pub mod opt;
pub mod scan;

/// Set up error reporting and logging, then parse the arguments
pub fn init<T: clap::Parser>() -> color_eyre::Result<T> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("GLYPH_TOOL_LOG"))
        .init();
    let args = T::parse();
    Ok(args)
}
