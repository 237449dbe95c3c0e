//! VoidCanvas Render Library
//!
//! Software implementation of the raster surface: an RGBA pixel buffer with
//! round-capped line drawing, glyph rasterization and PNG export.

mod glyphs;
mod pixmap;

pub use glyphs::GlyphSource;
pub use pixmap::{PixelSnapshot, PixmapSurface};

use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Font load failed: {0}")]
    Font(String),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;
