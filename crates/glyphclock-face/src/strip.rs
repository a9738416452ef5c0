use std::rc::Rc;

use glyphclock_engine::coords::{Rect, Vec2, Viewport};
use glyphclock_engine::raster::Bitmap;
use glyphclock_engine::scene::{DrawList, ZIndex};

/// Where one displayed bitmap lands on the surface.
#[derive(Debug, Clone)]
pub struct Placement {
    pub slot: usize,
    pub rect: Rect,
    pub bitmap: Rc<Bitmap>,
}

/// Lays out a horizontal strip of glyph bitmaps.
///
/// Holds the bitmaps handed to the last [`render`](Self::render) call so
/// they stay alive until they are replaced on the next tick.
#[derive(Debug)]
pub struct StripRenderer {
    slot_width: f32,
    displayed: Vec<Option<Rc<Bitmap>>>,
}

impl StripRenderer {
    pub fn new(slot_width: f32) -> Self {
        Self { slot_width: slot_width.max(0.0), displayed: Vec::new() }
    }

    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Replaces the displayed strip. `None` entries keep their slot empty.
    pub fn render(&mut self, bitmaps: Vec<Option<Rc<Bitmap>>>) {
        self.displayed = bitmaps;
    }

    pub fn displayed(&self) -> &[Option<Rc<Bitmap>>] {
        &self.displayed
    }

    /// Width of all slots together.
    pub fn strip_width(&self) -> f32 {
        self.slot_width * self.displayed.len() as f32
    }

    /// Slot `i` starts at `i * slot_width`; each bitmap is centered in its
    /// slot horizontally and in the viewport vertically. A bitmap covers as
    /// many logical pixels as it has pixels.
    pub fn layout(&self, viewport: Viewport) -> Vec<Placement> {
        self.displayed
            .iter()
            .enumerate()
            .filter_map(|(slot, bitmap)| {
                let bitmap = bitmap.as_ref()?;
                let cell = Rect::new(slot as f32 * self.slot_width, 0.0, self.slot_width, viewport.height);
                let size = Vec2::from_pixels(bitmap.width(), bitmap.height());
                Some(Placement {
                    slot,
                    rect: cell.centered(size).snapped(),
                    bitmap: Rc::clone(bitmap),
                })
            })
            .collect()
    }

    /// Clears `list` and records the current strip into it.
    pub fn paint(&self, viewport: Viewport, list: &mut DrawList) {
        list.clear();
        for p in self.layout(viewport) {
            list.push_image(ZIndex(0), p.rect, p.bitmap);
        }
    }
}
