use chrono::Timelike;

use glyphclock_engine::coords::Viewport;
use glyphclock_engine::scene::DrawList;

use crate::cache::FrameCache;
use crate::scheduler::FrameScheduler;
use crate::store::GlyphStore;
use crate::strip::StripRenderer;

/// Everything the clock face needs between ticks.
#[derive(Debug)]
pub struct ClockFace {
    store: GlyphStore,
    cache: FrameCache,
    scheduler: FrameScheduler,
    strip: StripRenderer,
    draw_list: DrawList,
}

impl ClockFace {
    /// Slots are `cache.target_width()` logical pixels wide.
    pub fn new(store: GlyphStore, cache: FrameCache) -> Self {
        let scheduler = FrameScheduler::new(cache.frame_count());
        let strip = StripRenderer::new(cache.target_width() as f32);
        Self { store, cache, scheduler, strip, draw_list: DrawList::new() }
    }

    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn strip(&self) -> &StripRenderer {
        &self.strip
    }

    /// Advances the animation one step at wall-clock `time`.
    pub fn tick(&mut self, time: &impl Timelike) {
        let bitmaps = self.scheduler.tick(time, &self.cache, &self.store);
        self.strip.render(bitmaps);
    }

    /// Records the current strip and returns the draw list to hand to the
    /// image renderer.
    pub fn paint(&mut self, viewport: Viewport) -> &mut DrawList {
        self.strip.paint(viewport, &mut self.draw_list);
        &mut self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::sampler::ClockSampler;
    use chrono::NaiveTime;

    #[test]
    fn nothing_is_drawn_before_the_first_tick() {
        let (cache, _) = FrameCache::build(&GlyphStore::new(), 9, 20).unwrap();
        let mut face = ClockFace::new(GlyphStore::new(), cache);
        assert!(face.paint(Viewport::new(140.0, 40.0)).is_empty());
    }

    #[test]
    fn tick_then_paint_draws_every_position() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_glyph_root(dir.path(), 2);
        let store = GlyphStore::from_root(dir.path());
        let (cache, _) = FrameCache::build(&store, 2, 20).unwrap();
        let mut face = ClockFace::new(store, cache);

        face.tick(&NaiveTime::from_hms_opt(10, 30, 0).unwrap());

        assert_eq!(face.strip().strip_width(), 20.0 * ClockSampler::POSITIONS as f32);
        let list = face.paint(Viewport::new(140.0, 40.0));
        assert_eq!(list.len(), ClockSampler::POSITIONS);
    }
}
