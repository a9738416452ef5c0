//! CPU-side raster images.
//!
//! A [`Bitmap`] is what decoders produce and what the image renderer uploads.
//! Bitmaps are immutable once built and are shared by reference counting.

mod bitmap;

pub use bitmap::{Bitmap, BitmapError, BitmapId};
