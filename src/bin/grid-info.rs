use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use glyph_tool::cli::scan::ScanFile;
use prettytable::{format, row, Cell, Row, Table};

#[derive(clap::Parser)]
/// Print the contents of a recognized grid file
struct Options {
    /// A grid file (*.ron)
    file: PathBuf,
    /// Also print the mask of every glyph
    #[clap(long, short = 'm')]
    masks: bool,
}

fn info(file: ScanFile, opt: &Options) -> eyre::Result<()> {
    if let Some((w, h)) = file.source {
        println!("Source image: {}x{}", w, h);
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["row", "col", "chr", "x", "y", "w", "h", "mask", "color"]);

    for (row, glyphs) in file.grid.rows() {
        for (col, glyph) in glyphs.iter().enumerate() {
            let mask = match &glyph.mask {
                Some(m) if glyph.mask_matches() => format!("{}x{}", m.width(), m.height()),
                Some(m) => format!("{}x{} (!)", m.width(), m.height()),
                None => String::from("-"),
            };
            let color = glyph
                .color
                .map(|c| c.to_string())
                .unwrap_or_else(|| String::from("-"));
            table.add_row(Row::new(vec![
                Cell::new(&format!("{:4}", row)),
                Cell::new(&format!("{:3}", col)),
                Cell::new(&format!("{:?}", glyph.letter)),
                Cell::new(&format!("{:4}", glyph.x)),
                Cell::new(&format!("{:4}", glyph.y)),
                Cell::new(&format!("{:3}", glyph.width)),
                Cell::new(&format!("{:3}", glyph.height)),
                Cell::new(&mask),
                Cell::new(&color),
            ]));
        }
    }
    table.printstd();

    if opt.masks {
        for glyph in file.grid.glyphs() {
            if let Some(mask) = &glyph.mask {
                println!("\n{:?} at {},{}", glyph.letter, glyph.x, glyph.y);
                print!("{}", mask);
            }
        }
    }

    let text = file.text.clone();
    match file.into_image() {
        Ok(image) => println!("\n{}", image.pretty_string()),
        Err(e) => {
            if let Some(text) = text {
                println!("\n{}", text);
            }
            println!("Text and grid are out of sync: {}", e);
        }
    }
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt: Options = Options::parse();

    let file = ScanFile::load(&opt.file)
        .wrap_err_with(|| format!("Failed to load {}", opt.file.display()))?;
    info(file, &opt)
}
