use log::warn;

use super::{Canvas, CanvasAllocationError, MaskBoundsError};
use crate::{color::Color, grid::GlyphGrid};

/// The padding right of and below the outermost glyphs
pub const GLYPH_MARGIN: u32 = 10;

/// The size of a canvas that holds every glyph of the grid
///
/// `min` is a lower bound, usually the size of the scanned source image.
pub fn canvas_size(grid: &GlyphGrid, min: (u32, u32)) -> (u64, u64) {
    let margin = u64::from(GLYPH_MARGIN);
    grid.glyphs().fold(
        (u64::from(min.0), u64::from(min.1)),
        |(width, height), g| {
            (
                width.max(u64::from(g.x) + u64::from(g.width) + margin),
                height.max(u64::from(g.y) + u64::from(g.height) + margin),
            )
        },
    )
}

/// Draw every colored, non-blank glyph onto a canvas
///
/// Glyphs without a color were never highlighted and are left out. Mask
/// problems are collected and do not stop the other glyphs.
pub fn composite(canvas: &mut Canvas, grid: &GlyphGrid) -> Vec<MaskBoundsError> {
    let mut problems = Vec::new();
    for glyph in grid.glyphs().filter(|g| g.is_drawn()) {
        if let Some(color) = glyph.color {
            if let Err(e) = canvas.draw_glyph(glyph, color) {
                problems.push(e);
            }
        }
    }
    problems
}

/// Render a highlighted grid onto a fresh white canvas
pub fn render_grid(grid: &GlyphGrid, min: (u32, u32)) -> Result<Canvas, CanvasAllocationError> {
    let (width, height) = canvas_size(grid, min);
    let mut canvas = Canvas::new(width, height)?;
    canvas.fill(Color::WHITE);
    for problem in composite(&mut canvas, grid) {
        warn!("{}", problem);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::{canvas_size, composite, render_grid};
    use crate::{
        color::Color,
        grid::{GlyphGrid, GlyphRecord, Mask},
        raster::{CanvasAllocationError, MAX_CANVAS_DIMENSION},
    };

    const BLUE: Color = Color::from_rgb(0x0000FF);

    fn h_glyph() -> GlyphRecord {
        // 4 wide, 6 high, plus the baseline row
        let mask = Mask::from_text_rows(&[
            "#..#", "#..#", "####", "#..#", "#..#", "#..#", "....",
        ])
        .unwrap();
        GlyphRecord::new('H', 0, 0, 4, 6).with_mask(mask)
    }

    #[test]
    fn test_canvas_size() {
        let mut grid = GlyphGrid::new();
        grid.push(5, GlyphRecord::new('x', 5, 5, 10, 8));
        assert_eq!(canvas_size(&grid, (0, 0)), (25, 23));
        assert_eq!(canvas_size(&grid, (40, 12)), (40, 23));
        assert_eq!(canvas_size(&GlyphGrid::new(), (7, 9)), (7, 9));
    }

    #[test]
    fn test_canvas_size_counts_blanks() {
        let mut grid = GlyphGrid::new();
        grid.push(0, GlyphRecord::new('a', 0, 0, 5, 5));
        grid.push(0, GlyphRecord::new(' ', 30, 0, 5, 5));
        assert_eq!(canvas_size(&grid, (0, 0)), (45, 15));
    }

    #[test]
    fn test_render_too_large() {
        let mut grid = GlyphGrid::new();
        grid.push(0, GlyphRecord::new('x', u32::MAX - 5, 0, 1, 1));
        assert_eq!(
            render_grid(&grid, (0, 0)),
            Err(CanvasAllocationError::TooLarge {
                width: u64::from(u32::MAX) + 6,
                height: 11,
                limit: MAX_CANVAS_DIMENSION
            })
        );
    }

    #[test]
    fn test_render_h() {
        let mut glyph = h_glyph();
        glyph.color = Some(BLUE);
        let mask = glyph.mask.clone().unwrap();
        let mut grid = GlyphGrid::new();
        grid.push(0, glyph);

        let canvas = render_grid(&grid, (0, 0)).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (14, 16));
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let expected = if mask.get(x, y) == Some(true) {
                    BLUE
                } else {
                    Color::WHITE
                };
                assert_eq!(canvas.pixel(x, y), Some(expected), "at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_uncolored_and_blank_glyphs_are_skipped() {
        let mut blank = h_glyph();
        blank.letter = ' ';
        blank.color = Some(BLUE);
        let uncolored = GlyphRecord { x: 6, ..h_glyph() };
        let mut grid = GlyphGrid::new();
        grid.push(0, blank);
        grid.push(0, uncolored);

        let canvas = render_grid(&grid, (0, 0)).unwrap();
        assert!(canvas.pixels().iter().all(|&px| px == Color::WHITE.argb()));
    }

    #[test]
    fn test_bad_mask_does_not_stop_others() {
        let mut bad = GlyphRecord::new('l', 0, 0, 1, 3)
            .with_mask(Mask::from_text_rows(&["#"]).unwrap());
        bad.color = Some(BLUE);
        let mut good = h_glyph();
        good.x = 4;
        good.color = Some(BLUE);
        let mut grid = GlyphGrid::new();
        grid.push(0, bad);
        grid.push(0, good);

        let mut canvas = render_grid(&grid, (0, 0)).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(BLUE));
        assert_eq!(canvas.pixel(0, 1), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), Some(BLUE));
        assert_eq!(canvas.pixel(7, 2), Some(BLUE));

        let problems = composite(&mut canvas, &grid);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].letter, 'l');
        assert_eq!(problems[0].clipped, 3);
    }
}
