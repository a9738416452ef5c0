use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a [`Bitmap`].
///
/// Renderers key their GPU uploads by this id, so two bitmaps with equal
/// pixels are still uploaded separately.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BitmapId(u64);

impl BitmapId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Error returned by [`Bitmap::from_premul_rgba`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BitmapError {
    ZeroSize { width: u32, height: u32 },
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::ZeroSize { width, height } => {
                write!(f, "bitmap has zero size ({width}x{height})")
            }
            BitmapError::LengthMismatch { expected, actual } => {
                write!(f, "bitmap pixel buffer is {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for BitmapError {}

/// Immutable RGBA8 raster with premultiplied alpha.
///
/// Pixels are row-major and tightly packed (`stride == width * 4`).
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    id: BitmapId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps premultiplied RGBA8 pixels.
    pub fn from_premul_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::ZeroSize { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BitmapError::LengthMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { id: BitmapId::next(), width, height, pixels })
    }

    /// Wraps straight-alpha RGBA8 pixels, premultiplying in place.
    pub fn from_straight_rgba(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self, BitmapError> {
        for px in pixels.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
        Self::from_premul_rgba(width, height, pixels)
    }

    #[inline]
    pub fn id(&self) -> BitmapId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.width * 4
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_size() {
        let err = Bitmap::from_premul_rgba(0, 4, Vec::new()).unwrap_err();
        assert_eq!(err, BitmapError::ZeroSize { width: 0, height: 4 });
    }

    #[test]
    fn rejects_short_buffer() {
        let err = Bitmap::from_premul_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err, BitmapError::LengthMismatch { expected: 16, actual: 15 });
    }

    #[test]
    fn ids_are_unique() {
        let a = Bitmap::from_premul_rgba(1, 1, vec![0; 4]).unwrap();
        let b = Bitmap::from_premul_rgba(1, 1, vec![0; 4]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let bmp = Bitmap::from_straight_rgba(2, 1, vec![200, 100, 50, 128, 10, 20, 30, 255]).unwrap();
        assert_eq!(&bmp.pixels()[..4], &[100, 50, 25, 128]);
        // Opaque pixels are untouched.
        assert_eq!(&bmp.pixels()[4..], &[10, 20, 30, 255]);
    }
}
