//! Paint model shared between the clock face and the renderer.
//!
//! Colors are linear premultiplied RGBA; bitmaps live in `raster`.

pub mod color;

pub use color::Color;
