//! # Compositing glyph grids into bitmaps

mod canvas;
mod compose;

pub use canvas::{Canvas, CanvasAllocationError, MaskBoundsError, MAX_CANVAS_DIMENSION};
pub use compose::{canvas_size, composite, render_grid, GLYPH_MARGIN};
