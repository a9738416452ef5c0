//! Time subsystem.
//!
//! Provides a fixed-interval ticker that drives periodic application work
//! without coupling to the runtime's event API.
//!
//! Intended usage:
//! - one `Ticker` per window
//! - the runtime sleeps until `next_deadline()` and calls `poll()` on wake-up

mod ticker;

pub use ticker::{Tick, Ticker};
