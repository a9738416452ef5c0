use std::rc::Rc;

use crate::coords::Rect;
use crate::raster::Bitmap;

/// Renderer-agnostic draw command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image(ImageCmd),
}

/// Draws a bitmap stretched over `rect`.
///
/// The command holds a strong reference, so the bitmap outlives the frame
/// that displays it even if its producer drops it mid-frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub bitmap: Rc<Bitmap>,
    /// Multiplier in `[0, 1]` applied to the premultiplied texel.
    pub opacity: f32,
}

impl ImageCmd {
    #[inline]
    pub fn new(rect: Rect, bitmap: Rc<Bitmap>) -> Self {
        Self { rect, bitmap, opacity: 1.0 }
    }
}
