use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::time::Tick;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order per window: `on_tick` whenever the window's ticker fires
/// (followed by a redraw request), `on_frame` for every redraw.
pub trait App {
    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called when the periodic ticker fires. Only windows configured with a
    /// tick interval receive ticks.
    fn on_tick(&mut self, window_id: WindowId, tick: Tick) -> AppControl {
        let _ = (window_id, tick);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
