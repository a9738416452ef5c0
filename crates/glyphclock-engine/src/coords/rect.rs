use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Returns a rectangle of `size` whose center coincides with this one's.
    ///
    /// `size` may exceed `self`; the result then overhangs evenly on both sides.
    #[inline]
    pub fn centered(self, size: Vec2) -> Rect {
        Rect::from_origin_size(self.center() - size * 0.5, size)
    }

    /// Snaps the origin to whole logical pixels.
    ///
    /// Edges land on device pixels only at a scale factor of 1; at other
    /// scales the sampler still filters the bitmap.
    #[inline]
    pub fn snapped(self) -> Rect {
        Rect::from_origin_size(Vec2::new(self.origin.x.round(), self.origin.y.round()), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── centered ──────────────────────────────────────────────────────────

    #[test]
    fn centered_smaller_size() {
        let slot = r(100.0, 0.0, 120.0, 240.0);
        let inner = slot.centered(Vec2::new(100.0, 140.0));
        assert_eq!(inner, r(110.0, 50.0, 100.0, 140.0));
    }

    #[test]
    fn centered_larger_size_overhangs_evenly() {
        let slot = r(0.0, 0.0, 10.0, 10.0);
        let inner = slot.centered(Vec2::new(10.0, 30.0));
        assert_eq!(inner.origin.y, -10.0);
        assert_eq!(inner.max().y, 20.0);
    }

    // ── snapped ───────────────────────────────────────────────────────────

    #[test]
    fn snapped_rounds_origin_only() {
        let s = r(10.4, 7.6, 3.5, 3.5).snapped();
        assert_eq!(s, r(10.0, 8.0, 3.5, 3.5));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
