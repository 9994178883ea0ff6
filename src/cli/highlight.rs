//! # Highlighting a batch of recognized images
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{self, eyre, WrapErr};
use glyphs::{
    highlight_with,
    lex::{PlainTokenizer, WordTokenizer},
    raster::render_grid,
    GlyphGrid, Tokenizer,
};
use image::ImageFormat;
use log::{debug, error, info, warn};
use prettytable::{format, row, Cell, Row, Table};

use super::{
    opt::{Config, Options},
    scan::{self, ScanFile},
};

/// What happened to one input file
pub struct Report {
    /// The grid file
    pub file: PathBuf,
    /// The language it was highlighted as
    pub language: String,
    /// The result
    pub outcome: Result<Written, eyre::Report>,
}

/// A successfully written image
pub struct Written {
    /// Number of glyphs in the grid
    pub glyphs: usize,
    /// Number of glyphs that got a color
    pub stamped: usize,
    /// Number of glyphs with a malformed mask
    pub bad_masks: usize,
    /// Size of the image
    pub size: (u32, u32),
    /// Where the image was saved
    pub path: PathBuf,
}

fn select_tokenizer(
    opt: &Options,
    config: &Config,
    file: &Path,
) -> (String, Box<dyn Tokenizer>) {
    if opt.plain {
        return (String::from("plain"), Box::new(PlainTokenizer));
    }
    let languages = config.languages();
    let found = match (&opt.lang, scan::language_hint(file)) {
        (Some(name), _) => languages
            .by_name(name)
            .or_else(|| languages.by_extension(name)),
        (None, Some(ext)) => languages.by_extension(ext),
        (None, None) => None,
    };
    match found {
        Some(def) => (def.name.clone(), Box::new(WordTokenizer::new(def))),
        None => {
            warn!(
                "No language for {}, rendering without highlighting",
                file.display()
            );
            (String::from("plain"), Box::new(PlainTokenizer))
        }
    }
}

/// Highlight and render a single grid file into `out_dir`
pub fn process_file(
    file: &Path,
    tokenizer: &dyn Tokenizer,
    config: &Config,
    min_size: Option<(u32, u32)>,
    out_dir: &Path,
) -> eyre::Result<Written> {
    let scan_file = ScanFile::load(file).wrap_err("Failed to load grid")?;
    let min_size = min_size.or(scan_file.source).unwrap_or((0, 0));
    let mut image = scan_file
        .into_image()
        .wrap_err("Recognized text does not match the grid")?;
    debug!("Text: {:?}", image.pretty_string());

    let stamped = highlight_with(&mut image, tokenizer, &config.theme)
        .wrap_err("Highlighting is unreliable, text and grid are out of sync")?;

    let grid = image.grid();
    let bad_masks = bad_mask_count(grid);
    let canvas = render_grid(grid, min_size)?;

    let path = out_dir.join(scan::output_name(file));
    info!("Saving {}", path.display());
    canvas
        .to_image()
        .save_with_format(&path, ImageFormat::Png)?;

    Ok(Written {
        glyphs: grid.glyph_count(),
        stamped,
        bad_masks,
        size: (canvas.width(), canvas.height()),
        path,
    })
}

/// The number of drawn glyphs whose mask does not fit
fn bad_mask_count(grid: &GlyphGrid) -> usize {
    grid.glyphs()
        .filter(|g| g.is_drawn() && !g.mask_matches())
        .count()
}

fn default_out_dir(input: &Path) -> PathBuf {
    let parent = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    parent.join("highlighted")
}

fn print_reports(reports: &[Report]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["file", "lang", "glyphs", "colored", "bad masks", "size", "result"]);

    for report in reports {
        let name = report.file.display().to_string();
        let row = match &report.outcome {
            Ok(w) => Row::new(vec![
                Cell::new(&name),
                Cell::new(&report.language),
                Cell::new(&format!("{:6}", w.glyphs)),
                Cell::new(&format!("{:6}", w.stamped)),
                Cell::new(&format!("{:3}", w.bad_masks)),
                Cell::new(&format!("{}x{}", w.size.0, w.size.1)),
                Cell::new(&w.path.display().to_string()),
            ]),
            Err(e) => Row::new(vec![
                Cell::new(&name),
                Cell::new(&report.language),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(&format!("FAILED: {}", e)),
            ]),
        };
        table.add_row(row);
    }

    table.printstd();
}

/// Run the tool
pub fn run(opt: &Options) -> eyre::Result<()> {
    let config = opt.config().wrap_err("Failed to load config")?;
    let inputs = scan::find_inputs(&opt.file)?;
    if inputs.is_empty() {
        return Err(eyre!("No grid files found in {}", opt.file.display()));
    }

    let out_dir = match &opt.out {
        Some(path) => path.clone(),
        None => default_out_dir(&opt.file),
    };
    std::fs::create_dir_all(&out_dir)?;

    let min_size = match &opt.source_image {
        Some(path) => Some(
            image::image_dimensions(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    info!("Highlighting {} image(s)...", inputs.len());
    let start = Instant::now();

    let mut reports = Vec::with_capacity(inputs.len());
    for file in inputs {
        let (language, tokenizer) = select_tokenizer(opt, &config, &file);
        let outcome = process_file(&file, tokenizer.as_ref(), &config, min_size, &out_dir);
        if let Err(e) = &outcome {
            error!("{}: {:?}", file.display(), e);
        }
        reports.push(Report {
            file,
            language,
            outcome,
        });
    }

    info!(
        "Finished highlighting all images in {}ms",
        start.elapsed().as_millis()
    );
    print_reports(&reports);

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        return Err(eyre!("{} of {} image(s) failed", failed, reports.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use glyphs::{Color, GlyphGrid, GlyphRecord, Mask};

    use super::{bad_mask_count, default_out_dir};

    #[test]
    fn test_bad_mask_count() {
        let short = || Mask::from_text_rows(&["#"]).unwrap();
        let mut grid = GlyphGrid::new();
        // never drawn: uncolored, blank
        grid.push(0, GlyphRecord::new('a', 0, 0, 1, 2).with_mask(short()));
        let mut blank = GlyphRecord::new(' ', 2, 0, 1, 2).with_mask(short());
        blank.color = Some(Color::BLACK);
        grid.push(0, blank);
        // drawn
        let mut bad = GlyphRecord::new('b', 4, 0, 1, 2).with_mask(short());
        bad.color = Some(Color::BLACK);
        grid.push(0, bad);
        let mut good = GlyphRecord::new('c', 6, 0, 1, 0).with_mask(short());
        good.color = Some(Color::BLACK);
        grid.push(0, good);
        assert_eq!(bad_mask_count(&grid), 1);
    }

    #[test]
    fn test_default_out_dir() {
        assert_eq!(
            default_out_dir(Path::new("scans/Main.java.ron")),
            Path::new("scans/highlighted")
        );
    }
}
