use std::collections::HashMap;
use std::rc::Rc;

use glyphclock_engine::raster::Bitmap;

use crate::decode::decode_asset;
use crate::frame::{FrameIndex, MAX_FRAME_COUNT};
use crate::store::GlyphStore;
use crate::{GlyphError, Symbol};

/// Decodes one frame of `symbol` from `store` at `target_width`.
pub fn load_frame(
    store: &GlyphStore,
    symbol: Symbol,
    frame: FrameIndex,
    target_width: u32,
) -> Result<Bitmap, GlyphError> {
    let path = store.asset_path(symbol, frame).ok_or(GlyphError::NoFolder(symbol))?;
    decode_asset(&path, target_width)
}

/// A frame that could not be cached.
#[derive(Debug)]
pub struct CacheFailure {
    pub symbol: Symbol,
    pub frame: FrameIndex,
    pub error: GlyphError,
}

/// Outcome of [`FrameCache::build`].
#[derive(Debug, Default)]
pub struct BuildReport {
    pub cached: usize,
    pub failures: Vec<CacheFailure>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, symbol: Symbol, frame: FrameIndex) -> bool {
        self.failures.iter().any(|f| f.symbol == symbol && f.frame == frame)
    }
}

/// Decoded bitmaps keyed by `(Symbol, FrameIndex)`.
///
/// Built once before animation starts and never modified afterwards; a
/// partially populated cache is valid.
#[derive(Debug)]
pub struct FrameCache {
    frames: HashMap<(Symbol, FrameIndex), Rc<Bitmap>>,
    target_width: u32,
    frame_count: u32,
}

impl FrameCache {
    /// Decodes frames `1..=frame_count` of every symbol in `store`.
    ///
    /// Individual decode failures are logged and recorded in the report;
    /// only a `frame_count` outside `1..=MAX_FRAME_COUNT` or a zero
    /// `target_width` fails the build.
    pub fn build(
        store: &GlyphStore,
        frame_count: u32,
        target_width: u32,
    ) -> Result<(FrameCache, BuildReport), GlyphError> {
        if frame_count == 0 {
            return Err(GlyphError::InvalidConfig("frame count must be at least 1"));
        }
        if frame_count > MAX_FRAME_COUNT {
            return Err(GlyphError::InvalidConfig("frame count exceeds 1024"));
        }
        if target_width == 0 {
            return Err(GlyphError::InvalidConfig("target width must be at least 1 pixel"));
        }

        log::info!(
            "caching {} frames for {} symbols at {target_width}px",
            frame_count,
            store.len()
        );

        let mut frames = HashMap::new();
        let mut report = BuildReport::default();

        for symbol in store.symbols() {
            for frame in FrameIndex::all(frame_count) {
                match load_frame(store, symbol, frame, target_width) {
                    Ok(bitmap) => {
                        frames.insert((symbol, frame), Rc::new(bitmap));
                        report.cached += 1;
                    }
                    Err(error) => {
                        log::warn!("skipping {symbol} frame {frame}: {error}");
                        report.failures.push(CacheFailure { symbol, frame, error });
                    }
                }
            }
        }

        log::info!(
            "frame cache ready: {} cached, {} failed",
            report.cached,
            report.failures.len()
        );

        Ok((FrameCache { frames, target_width, frame_count }, report))
    }

    pub fn get(&self, symbol: Symbol, frame: FrameIndex) -> Option<&Rc<Bitmap>> {
        self.frames.get(&(symbol, frame))
    }

    pub fn contains(&self, symbol: Symbol, frame: FrameIndex) -> bool {
        self.frames.contains_key(&(symbol, frame))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::fs;

    fn frame(n: u32) -> FrameIndex {
        FrameIndex::new(n).unwrap()
    }

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn every_pair_is_cached_at_target_width() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 3);
        let store = GlyphStore::from_root(dir.path());

        let (cache, report) = FrameCache::build(&store, 3, 60).unwrap();

        assert!(report.is_complete());
        assert_eq!(cache.len(), Symbol::ALL.len() * 3);
        assert_eq!(report.cached, cache.len());
        for symbol in Symbol::ALL {
            for f in FrameIndex::all(3) {
                let bmp = cache.get(symbol, f).unwrap();
                assert_eq!(bmp.width(), 60);
                assert_eq!(bmp.height(), 120);
            }
        }
    }

    #[test]
    fn missing_asset_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 9);
        fs::remove_file(dir.path().join("7").join("3.svg")).unwrap();
        let store = GlyphStore::from_root(dir.path());

        let (cache, report) = FrameCache::build(&store, 9, 40).unwrap();

        assert!(!cache.contains(Symbol::Seven, frame(3)));
        assert!(cache.contains(Symbol::Seven, frame(2)));
        assert!(cache.contains(Symbol::Seven, frame(4)));
        assert_eq!(cache.len(), Symbol::ALL.len() * 9 - 1);

        assert_eq!(report.failures.len(), 1);
        assert!(report.failed(Symbol::Seven, frame(3)));
        assert!(matches!(report.failures[0].error, GlyphError::Io { .. }));
    }

    #[test]
    fn corrupt_and_empty_assets_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 2);
        fs::write(dir.path().join("colon").join("1.svg"), b"").unwrap();
        fs::write(dir.path().join("A").join("2.svg"), b"not an svg").unwrap();
        let store = GlyphStore::from_root(dir.path());

        let (cache, report) = FrameCache::build(&store, 2, 40).unwrap();

        assert_eq!(report.failures.len(), 2);
        assert!(report.failed(Symbol::Colon, frame(1)));
        assert!(report.failed(Symbol::Am, frame(2)));
        assert!(cache.contains(Symbol::Colon, frame(2)));
    }

    #[test]
    fn only_registered_symbols_are_built() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 1);

        let mut store = GlyphStore::new();
        store.insert(Symbol::Five, dir.path().join("5"));

        let (cache, report) = FrameCache::build(&store, 1, 40).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(report.is_complete());
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn zero_frame_count_or_width_is_rejected() {
        let store = GlyphStore::new();
        assert!(matches!(FrameCache::build(&store, 0, 40), Err(GlyphError::InvalidConfig(_))));
        assert!(matches!(FrameCache::build(&store, 9, 0), Err(GlyphError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_frame_count_is_rejected_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 1);
        let store = GlyphStore::from_root(dir.path());

        assert!(matches!(FrameCache::build(&store, u32::MAX, 40), Err(GlyphError::InvalidConfig(_))));
        assert!(matches!(
            FrameCache::build(&store, MAX_FRAME_COUNT + 1, 40),
            Err(GlyphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn largest_frame_count_is_accepted() {
        let (cache, report) = FrameCache::build(&GlyphStore::new(), MAX_FRAME_COUNT, 40).unwrap();
        assert!(cache.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn empty_store_builds_empty_cache() {
        let (cache, report) = FrameCache::build(&GlyphStore::new(), 9, 40).unwrap();
        assert!(cache.is_empty());
        assert_eq!(report.cached, 0);
        assert_eq!(cache.frame_count(), 9);
        assert_eq!(cache.target_width(), 40);
    }
}
