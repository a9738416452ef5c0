//! glyphclock face: animated glyph clock on top of `glyphclock-engine`.
//!
//! Glyph frames are read from a [`GlyphStore`], decoded once into a
//! [`FrameCache`], and shown by a [`FrameScheduler`] that samples the wall
//! clock on every tick.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use glyphclock_face::ClockApplication;
//!
//! ClockApplication::new()
//!     .glyph_root("letters")
//!     .run()?;
//! ```

pub mod app;
pub mod cache;
pub mod decode;
pub mod error;
pub mod face;
pub mod frame;
pub mod sampler;
pub mod scheduler;
pub mod store;
pub mod strip;
pub mod symbol;

#[cfg(test)]
mod fixtures;

pub use app::{ClockApplication, ClockConfig};
pub use cache::{BuildReport, CacheFailure, FrameCache};
pub use error::GlyphError;
pub use face::ClockFace;
pub use frame::{FrameIndex, DEFAULT_FRAME_COUNT, MAX_FRAME_COUNT};
pub use sampler::ClockSampler;
pub use scheduler::FrameScheduler;
pub use store::GlyphStore;
pub use strip::{Placement, StripRenderer};
pub use symbol::Symbol;
