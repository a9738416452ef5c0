use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use glyphclock_engine::coords::Viewport;
use glyphclock_engine::core::{App as EngineApp, AppControl, FrameCtx};
use glyphclock_engine::device::GpuInit;
use glyphclock_engine::paint::Color;
use glyphclock_engine::render::image::ImageRenderer;
use glyphclock_engine::time::Tick;
use glyphclock_engine::window::{Runtime, RuntimeConfig};

use crate::cache::FrameCache;
use crate::face::ClockFace;
use crate::frame::{DEFAULT_FRAME_COUNT, MAX_FRAME_COUNT};
use crate::sampler::ClockSampler;
use crate::store::GlyphStore;
use crate::Symbol;

// ── ClockConfig ───────────────────────────────────────────────────────────

/// Settings for a clock window.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub title: String,
    /// Directory holding one sub-folder per symbol.
    pub glyph_root: PathBuf,
    /// Folders registered on top of (and overriding) `glyph_root`.
    pub glyph_folders: Vec<(Symbol, PathBuf)>,
    pub frame_count: u32,
    pub tick_interval: Duration,
    /// Width every glyph is decoded to, in pixels. Slots are this many
    /// logical pixels wide, so on a scaled display the bitmap is stretched.
    pub glyph_width: u32,
    pub window_height: f64,
    pub background: Color,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            title: "glyphclock".to_string(),
            glyph_root: PathBuf::from("letters"),
            glyph_folders: Vec::new(),
            frame_count: DEFAULT_FRAME_COUNT,
            tick_interval: Duration::from_millis(67),
            glyph_width: 120,
            window_height: 240.0,
            background: Color::from_srgb_u8(0x10, 0x10, 0x10, 0xff),
        }
    }
}

impl ClockConfig {
    /// Rejects settings the face cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_FRAME_COUNT).contains(&self.frame_count),
            "frame count must be between 1 and {MAX_FRAME_COUNT}"
        );
        ensure!(self.glyph_width >= 1, "glyph width must be at least 1 pixel");
        ensure!(
            self.tick_interval >= Duration::from_millis(1),
            "tick interval must be at least 1 ms"
        );
        ensure!(
            self.window_height.is_finite() && self.window_height >= 1.0,
            "window height must be at least 1 pixel"
        );
        Ok(())
    }

    /// Logical window size that fits every position exactly.
    pub fn window_size(&self) -> LogicalSize<f64> {
        LogicalSize::new(
            self.glyph_width as f64 * ClockSampler::POSITIONS as f64,
            self.window_height,
        )
    }

    pub fn glyph_store(&self) -> GlyphStore {
        let mut store = GlyphStore::from_root(&self.glyph_root);
        for (symbol, folder) in &self.glyph_folders {
            store.insert(*symbol, folder);
        }
        store
    }
}

// ── ClockApplication ──────────────────────────────────────────────────────

/// Clock window builder.
///
/// ```rust,ignore
/// ClockApplication::new()
///     .title("glyphclock")
///     .glyph_root("letters")
///     .frame_count(9)
///     .tick_interval(Duration::from_millis(67))
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClockApplication {
    config: ClockConfig,
}

impl ClockApplication {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ClockConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.config.title = t.into();
        self
    }

    /// Directory with one folder per symbol (`0`..`9`, `colon`, `space`, `A`, `P`).
    pub fn glyph_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.glyph_root = root.into();
        self
    }

    /// Use `folder` for `symbol` regardless of the glyph root.
    pub fn glyph_folder(mut self, symbol: Symbol, folder: impl Into<PathBuf>) -> Self {
        self.config.glyph_folders.push((symbol, folder.into()));
        self
    }

    pub fn frame_count(mut self, n: u32) -> Self {
        self.config.frame_count = n;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn glyph_width(mut self, px: u32) -> Self {
        self.config.glyph_width = px;
        self
    }

    pub fn window_height(mut self, px: f64) -> Self {
        self.config.window_height = px;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Builds the frame cache, then opens the window and animates until it
    /// is closed.
    ///
    /// Returns an error only for invalid settings or when the window or GPU
    /// cannot be created; missing glyph frames are logged and left blank.
    pub fn run(self) -> Result<()> {
        let config = self.config;
        config.validate()?;

        let store = config.glyph_store();
        if store.is_empty() {
            log::warn!("no glyph folders found under {}", config.glyph_root.display());
        }

        let (cache, report) = FrameCache::build(&store, config.frame_count, config.glyph_width)
            .context("failed to build frame cache")?;
        if !report.is_complete() {
            log::warn!("{} glyph frames will be decoded on demand or left blank", report.failures.len());
        }

        let runtime = RuntimeConfig {
            title: config.title.clone(),
            initial_size: config.window_size(),
            resizable: false,
            tick_interval: Some(config.tick_interval),
        };

        let app = ClockApp {
            face: ClockFace::new(store, cache),
            background: config.background,
            image_renderer: ImageRenderer::new(),
        };

        log::info!(
            "starting clock: {} frames per glyph, {:?} per tick",
            config.frame_count,
            config.tick_interval
        );
        Runtime::run(runtime, GpuInit::default(), app).context("clock window failed")
    }
}

// ── ClockApp ──────────────────────────────────────────────────────────────

/// Lateness tolerated before a tick is worth a log line.
const LATE_TICK: Duration = Duration::from_millis(5);

/// Internal state that implements `glyphclock_engine::core::App`.
struct ClockApp {
    face: ClockFace,
    background: Color,
    image_renderer: ImageRenderer,
}

impl EngineApp for ClockApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed && event.logical_key == Key::Named(NamedKey::Escape) {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_tick(&mut self, _window_id: WindowId, tick: Tick) -> AppControl {
        if tick.lag > LATE_TICK {
            log::debug!("tick {} ran {:?} late", tick.index, tick.lag);
        }
        self.face.tick(&chrono::Local::now().time());
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let list = self.face.paint(Viewport::new(w, h));
        let renderer = &mut self.image_renderer;

        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, list);
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = ClockConfig::default();
        assert_eq!(c.frame_count, 9);
        assert_eq!(c.tick_interval, Duration::from_millis(67));
        assert_eq!(c.glyph_root, PathBuf::from("letters"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn window_fits_all_positions() {
        let c = ClockConfig { glyph_width: 100, window_height: 180.0, ..ClockConfig::default() };
        assert_eq!(c.window_size(), LogicalSize::new(700.0, 180.0));
    }

    #[test]
    fn zero_values_fail_validation() {
        let base = ClockConfig::default();
        assert!(ClockConfig { frame_count: 0, ..base.clone() }.validate().is_err());
        assert!(ClockConfig { frame_count: u32::MAX, ..base.clone() }.validate().is_err());
        assert!(ClockConfig { frame_count: MAX_FRAME_COUNT, ..base.clone() }.validate().is_ok());
        assert!(ClockConfig { glyph_width: 0, ..base.clone() }.validate().is_err());
        assert!(ClockConfig { tick_interval: Duration::ZERO, ..base }.validate().is_err());
    }

    #[test]
    fn builder_sets_config() {
        let app = ClockApplication::new()
            .title("t")
            .glyph_root("/tmp/g")
            .frame_count(4)
            .glyph_width(64)
            .glyph_folder(Symbol::Colon, "/tmp/dots");

        let c = app.config();
        assert_eq!(c.title, "t");
        assert_eq!(c.frame_count, 4);
        assert_eq!(c.glyph_width, 64);
        assert_eq!(c.glyph_folders, vec![(Symbol::Colon, PathBuf::from("/tmp/dots"))]);
    }

    #[test]
    fn explicit_folder_overrides_root() {
        let dir = tempfile::tempdir().unwrap();
        crate::fixtures::write_glyph_root(dir.path(), 1);
        let custom = dir.path().join("custom");
        std::fs::create_dir(&custom).unwrap();

        let c = ClockConfig {
            glyph_root: dir.path().to_path_buf(),
            glyph_folders: vec![(Symbol::Colon, custom.clone())],
            ..ClockConfig::default()
        };
        let store = c.glyph_store();
        assert_eq!(store.folder(Symbol::Colon), Some(custom.as_path()));
        assert_eq!(store.len(), Symbol::ALL.len());
    }
}
