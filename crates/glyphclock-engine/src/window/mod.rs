//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! drives each window's periodic ticker.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
