//! Text to ink: the rasterizer seam, its built-in backend and the alpha mask.

pub mod bitmap_font;
pub mod mask;
pub mod raster;

pub use bitmap_font::BitmapFontRasterizer;
pub use mask::AlphaMask;
pub use raster::{canvas_pixels, fit_text, rasterize_text, FitStrategy, GlyphRasterizer, TextPlacement};
