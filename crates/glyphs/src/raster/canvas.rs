use displaydoc::Display;
#[cfg(feature = "image")]
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::{color::Color, grid::GlyphRecord};

/// The largest width or height of a canvas
pub const MAX_CANVAS_DIMENSION: u32 = 32768;

/// Failed to create a canvas
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum CanvasAllocationError {
    /// a {width}x{height} canvas exceeds the limit of {limit} pixels per side
    TooLarge {
        /// The requested width
        width: u64,
        /// The requested height
        height: u64,
        /// The limit per side
        limit: u32,
    },
    /// could not allocate {bytes} bytes for a {width}x{height} canvas
    OutOfMemory {
        /// The requested width
        width: u32,
        /// The requested height
        height: u32,
        /// The size of the pixel buffer
        bytes: usize,
    },
}

/// A glyph mask does not match the declared glyph size
///
/// The glyph was drawn as far as both agree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "glyph {letter:?} at {x},{y}: mask is {mask_width}x{mask_height}, expected {width}x{height} ({clipped} cell(s) clipped)"
)]
pub struct MaskBoundsError {
    /// The recognized character
    pub letter: char,
    /// Horizontal position of the glyph
    pub x: u32,
    /// Vertical position of the glyph
    pub y: u32,
    /// Expected mask width
    pub width: u32,
    /// Expected mask height (declared height + 1)
    pub height: u32,
    /// Actual mask width
    pub mask_width: u32,
    /// Actual mask height
    pub mask_height: u32,
    /// Number of cells that could not be drawn
    pub clipped: usize,
}

/// An ARGB output bitmap
///
/// Pixels are stored row by row as `0xAARRGGBB`, not premultiplied.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u32>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Canvas({}x{})", self.width, self.height)
    }
}

impl Canvas {
    /// Allocate a transparent canvas
    pub fn new(width: u64, height: u64) -> Result<Self, CanvasAllocationError> {
        let limit = u64::from(MAX_CANVAS_DIMENSION);
        if width > limit || height > limit {
            return Err(CanvasAllocationError::TooLarge {
                width,
                height,
                limit: MAX_CANVAS_DIMENSION,
            });
        }
        let (width, height) = (width as u32, height as u32);
        let len = (width as usize) * (height as usize);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| CanvasAllocationError::OutOfMemory {
                width,
                height,
                bytes: len.saturating_mul(4),
            })?;
        buffer.resize(len, Color::TRANSPARENT.argb());
        Ok(Canvas {
            width,
            height,
            buffer,
        })
    }

    /// The width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row by row
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, color: Color) {
        for px in self.buffer.iter_mut() {
            *px = color.argb();
        }
    }

    /// The pixel at a position, `None` if out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| Color::from_argb(self.buffer[i]))
    }

    /// Replace the pixel at a position
    ///
    /// Returns `false` if the position is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.buffer[i] = color.argb();
                true
            }
            None => false,
        }
    }

    /// Draw the mask of a glyph in a single color
    ///
    /// Only the `width` × `height + 1` box of the glyph is drawn. Cells
    /// outside the mask or the canvas are skipped; if there are any, or the
    /// mask has the wrong size, the error describes them. Returns the number
    /// of pixels set.
    pub fn draw_glyph(
        &mut self,
        glyph: &GlyphRecord,
        color: Color,
    ) -> Result<usize, MaskBoundsError> {
        let mask = match &glyph.mask {
            Some(mask) => mask,
            None => return Ok(0),
        };
        let (width, height) = glyph.expected_mask_size();
        let mut drawn = 0;
        let mut clipped = 0;
        for y in 0..height {
            for x in 0..width {
                match mask.get(x, y) {
                    Some(true) => {
                        let pos = glyph.x.checked_add(x).zip(glyph.y.checked_add(y));
                        if pos.map_or(false, |(px, py)| self.set_pixel(px, py, color)) {
                            drawn += 1;
                        } else {
                            clipped += 1;
                        }
                    }
                    Some(false) => {}
                    None => clipped += 1,
                }
            }
        }
        if clipped > 0 || !glyph.mask_matches() {
            return Err(MaskBoundsError {
                letter: glyph.letter,
                x: glyph.x,
                y: glyph.y,
                width,
                height,
                mask_width: mask.width(),
                mask_height: mask.height(),
                clipped,
            });
        }
        Ok(drawn)
    }

    #[cfg(feature = "image")]
    #[cfg_attr(docsrs, doc(cfg(feature = "image")))]
    /// Turn the canvas into an `RgbaImage` from the `image` crate
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.buffer[(y as usize) * (self.width as usize) + x as usize];
            Rgba(Color::from_argb(argb).to_rgba())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasAllocationError, MAX_CANVAS_DIMENSION};
    use crate::{
        color::Color,
        grid::{GlyphRecord, Mask},
    };

    const RED: Color = Color::from_rgb(0xFF0000);

    #[test]
    fn test_new_is_transparent() {
        let canvas = Canvas::new(3, 2).unwrap();
        assert_eq!(canvas.pixels(), &[0u32; 6][..]);
        assert_eq!(canvas.pixel(3, 0), None);
    }

    #[test]
    fn test_too_large() {
        let limit = u64::from(MAX_CANVAS_DIMENSION);
        assert_eq!(
            Canvas::new(limit + 1, 10),
            Err(CanvasAllocationError::TooLarge {
                width: limit + 1,
                height: 10,
                limit: MAX_CANVAS_DIMENSION
            })
        );
    }

    #[test]
    fn test_draw_glyph_includes_baseline_row() {
        // 2 wide, 1 high: the mask has 2 rows
        let glyph = GlyphRecord::new('j', 1, 1, 2, 1)
            .with_mask(Mask::from_text_rows(&[".#", "#."]).unwrap());
        let mut canvas = Canvas::new(4, 4).unwrap();
        assert_eq!(canvas.draw_glyph(&glyph, RED), Ok(2));
        assert_eq!(canvas.pixel(2, 1), Some(RED));
        assert_eq!(canvas.pixel(1, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_glyph_short_mask() {
        // declared 2x2 (3 mask rows), but only 2 rows present
        let glyph = GlyphRecord::new('o', 0, 0, 2, 2)
            .with_mask(Mask::from_text_rows(&["##", "##"]).unwrap());
        let mut canvas = Canvas::new(4, 4).unwrap();
        let err = canvas.draw_glyph(&glyph, RED).unwrap_err();
        assert_eq!(err.clipped, 2);
        assert_eq!((err.mask_width, err.mask_height), (2, 2));
        assert_eq!((err.width, err.height), (2, 3));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(0, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_glyph_large_mask() {
        // declared 2x2 (3 mask rows), the mask is 3x4
        let glyph = GlyphRecord::new('m', 0, 0, 2, 2)
            .with_mask(Mask::from_text_rows(&["###", "###", "###", "###"]).unwrap());
        let mut canvas = Canvas::new(5, 5).unwrap();
        let err = canvas.draw_glyph(&glyph, RED).unwrap_err();
        assert_eq!(err.clipped, 0);
        assert_eq!((err.mask_width, err.mask_height), (3, 4));
        assert_eq!((err.width, err.height), (2, 3));
        for y in 0..5 {
            for x in 0..5 {
                let expected = if x < 2 && y < 3 {
                    RED
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(canvas.pixel(x, y), Some(expected), "at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_draw_glyph_off_canvas() {
        let glyph =
            GlyphRecord::new('.', 3, 3, 1, 1).with_mask(Mask::from_text_rows(&["#", "#"]).unwrap());
        let mut canvas = Canvas::new(4, 4).unwrap();
        let err = canvas.draw_glyph(&glyph, RED).unwrap_err();
        assert_eq!(err.clipped, 1);
        assert_eq!(canvas.pixel(3, 3), Some(RED));
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_to_image() {
        let mut canvas = Canvas::new(2, 1).unwrap();
        canvas.fill(Color::WHITE);
        canvas.set_pixel(1, 0, Color::from_argb(0x8012_3456));
        let image = canvas.to_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(image.get_pixel(1, 0).0, [0x12, 0x34, 0x56, 0x80]);
    }
}
