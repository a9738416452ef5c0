use std::collections::HashSet;
use std::rc::Rc;

use chrono::Timelike;
use glyphclock_engine::raster::Bitmap;

use crate::cache::{load_frame, FrameCache};
use crate::frame::FrameIndex;
use crate::sampler::ClockSampler;
use crate::store::GlyphStore;
use crate::Symbol;

/// Per-position animation state of the face.
///
/// Each tick samples the clock, resolves one bitmap per position and then
/// advances every position's frame. Frames advance on every tick whether or
/// not the digit in that position changed.
#[derive(Debug)]
pub struct FrameScheduler {
    frame_count: u32,
    positions: Vec<FrameIndex>,
    reported_misses: HashSet<(Symbol, FrameIndex)>,
}

impl FrameScheduler {
    /// `frame_count` of 0 is treated as 1.
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            positions: vec![FrameIndex::FIRST; ClockSampler::POSITIONS],
            reported_misses: HashSet::new(),
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Frame each position will show on the next tick.
    pub fn positions(&self) -> &[FrameIndex] {
        &self.positions
    }

    /// Runs one tick at wall-clock `time`.
    ///
    /// Returns one entry per position, left to right. A cache miss is decoded
    /// on demand for this tick only; a slot whose frame cannot be decoded is
    /// `None`.
    pub fn tick(
        &mut self,
        time: &impl Timelike,
        cache: &FrameCache,
        store: &GlyphStore,
    ) -> Vec<Option<Rc<Bitmap>>> {
        let symbols = ClockSampler::sample(time);
        let frames = self.positions.clone();

        let bitmaps = symbols
            .iter()
            .zip(frames)
            .map(|(&symbol, frame)| match cache.get(symbol, frame) {
                Some(bitmap) => Some(Rc::clone(bitmap)),
                None => self.resolve_miss(symbol, frame, cache, store),
            })
            .collect::<Vec<_>>();

        for frame in &mut self.positions {
            *frame = frame.next(self.frame_count);
        }

        bitmaps
    }

    fn resolve_miss(
        &mut self,
        symbol: Symbol,
        frame: FrameIndex,
        cache: &FrameCache,
        store: &GlyphStore,
    ) -> Option<Rc<Bitmap>> {
        let first = self.reported_misses.insert((symbol, frame));
        if first {
            log::warn!("{symbol} frame {frame} not cached; decoding on demand");
        } else {
            log::debug!("{symbol} frame {frame} not cached; decoding on demand");
        }

        match load_frame(store, symbol, frame, cache.target_width()) {
            Ok(bitmap) => Some(Rc::new(bitmap)),
            Err(err) => {
                if first {
                    log::warn!("{symbol} frame {frame} left blank: {err}");
                } else {
                    log::debug!("{symbol} frame {frame} left blank: {err}");
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::NaiveTime;
    use std::fs;

    fn frame(n: u32) -> FrameIndex {
        FrameIndex::new(n).unwrap()
    }

    fn one_oh_five() -> NaiveTime {
        NaiveTime::from_hms_opt(1, 5, 0).unwrap()
    }

    fn setup(frames: u32) -> (tempfile::TempDir, GlyphStore, FrameCache) {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), frames);
        let store = GlyphStore::from_root(dir.path());
        let (cache, _) = FrameCache::build(&store, frames, 20).unwrap();
        (dir, store, cache)
    }

    // ── advancing ─────────────────────────────────────────────────────────

    #[test]
    fn starts_at_first_frame_everywhere() {
        let s = FrameScheduler::new(9);
        assert_eq!(s.positions().len(), ClockSampler::POSITIONS);
        assert!(s.positions().iter().all(|&f| f == FrameIndex::FIRST));
    }

    #[test]
    fn last_frame_wraps_after_one_tick() {
        let (_dir, store, cache) = setup(9);
        let mut s = FrameScheduler::new(9);

        for _ in 0..8 {
            s.tick(&one_oh_five(), &cache, &store);
        }
        assert!(s.positions().iter().all(|&f| f == frame(9)));

        s.tick(&one_oh_five(), &cache, &store);
        assert!(s.positions().iter().all(|&f| f == FrameIndex::FIRST));
    }

    #[test]
    fn frames_advance_even_when_time_is_unchanged() {
        let (_dir, store, cache) = setup(3);
        let mut s = FrameScheduler::new(3);

        let first = s.tick(&one_oh_five(), &cache, &store);
        let second = s.tick(&one_oh_five(), &cache, &store);

        let id = |v: &Vec<Option<Rc<Bitmap>>>| v[0].as_ref().map(|b| b.id());
        assert_ne!(id(&first), id(&second));
        assert_eq!(s.positions()[0], frame(3));
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn tick_returns_cached_bitmaps_in_position_order() {
        let (_dir, store, cache) = setup(2);
        let mut s = FrameScheduler::new(2);

        let bitmaps = s.tick(&one_oh_five(), &cache, &store);
        let symbols = ClockSampler::sample(&one_oh_five());

        assert_eq!(bitmaps.len(), ClockSampler::POSITIONS);
        for (bmp, symbol) in bitmaps.iter().zip(symbols) {
            let cached = cache.get(symbol, FrameIndex::FIRST).unwrap();
            assert!(Rc::ptr_eq(bmp.as_ref().unwrap(), cached));
        }
    }

    #[test]
    fn cache_miss_decodes_on_demand_without_caching() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 1);
        let store = GlyphStore::from_root(dir.path());
        let (cache, _) = FrameCache::build(&store, 1, 20).unwrap();
        assert!(cache.contains(Symbol::Zero, FrameIndex::FIRST));

        // Frame 2 exists on disk but was never cached.
        fs::write(dir.path().join("0").join("2.svg"), fixtures::svg(10, 10)).unwrap();

        let mut s = FrameScheduler::new(2);
        s.tick(&one_oh_five(), &cache, &store);
        let bitmaps = s.tick(&one_oh_five(), &cache, &store);

        let zero = bitmaps[0].as_ref().unwrap();
        assert_eq!((zero.width(), zero.height()), (20, 20));
        assert!(!cache.contains(Symbol::Zero, frame(2)));
        // '1' has no frame 2 anywhere.
        assert!(bitmaps[1].is_none());
    }

    #[test]
    fn unregistered_symbol_leaves_slot_blank() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 1);
        fs::remove_dir_all(dir.path().join("space")).unwrap();
        let store = GlyphStore::from_root(dir.path());
        let (cache, _) = FrameCache::build(&store, 1, 20).unwrap();

        let mut s = FrameScheduler::new(1);
        let bitmaps = s.tick(&one_oh_five(), &cache, &store);

        assert!(bitmaps[5].is_none());
        assert_eq!(bitmaps.iter().filter(|b| b.is_some()).count(), ClockSampler::POSITIONS - 1);
    }
}
