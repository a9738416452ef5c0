use std::path::PathBuf;

use glyphclock_engine::raster::BitmapError;

/// Errors produced while locating, decoding, or caching glyph frames.
///
/// Every variant except `InvalidConfig` is recoverable at the call sites in
/// this crate: the frame is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("no glyph folder registered for symbol {0}")]
    NoFolder(crate::Symbol),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset is empty: {path}")]
    Empty { path: PathBuf },

    #[error("failed to parse SVG {path}: {source}")]
    Svg {
        path: PathBuf,
        #[source]
        source: resvg::usvg::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Raster {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} cannot be scaled to {target_width}px wide ({width}x{height} source)")]
    InvalidSize {
        path: PathBuf,
        width: f32,
        height: f32,
        target_width: u32,
    },

    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
