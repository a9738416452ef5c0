use std::fmt;

/// Frames per symbol when none is configured.
pub const DEFAULT_FRAME_COUNT: u32 = 9;

/// Largest accepted frame count.
pub const MAX_FRAME_COUNT: u32 = 1024;

/// 1-based animation frame number.
///
/// Always in `[1, frame_count]`; advancing past the last frame wraps to 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FrameIndex(u32);

impl FrameIndex {
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// Returns `None` for 0.
    pub const fn new(n: u32) -> Option<FrameIndex> {
        if n == 0 { None } else { Some(FrameIndex(n)) }
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The frame shown after this one.
    #[inline]
    pub fn next(self, frame_count: u32) -> FrameIndex {
        if self.0 < frame_count { FrameIndex(self.0 + 1) } else { FrameIndex::FIRST }
    }

    /// Iterates `1..=frame_count`.
    pub fn all(frame_count: u32) -> impl Iterator<Item = FrameIndex> {
        (1..=frame_count).map(FrameIndex)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
