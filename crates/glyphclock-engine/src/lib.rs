//! glyphclock engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the clock face: the winit
//! window loop, the wgpu device, a periodic ticker, and a textured-image
//! renderer fed from a draw list.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod raster;
pub mod render;
pub mod paint;
pub mod scene;
