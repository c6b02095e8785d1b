//! Time utilities.
//!
//! Provides a small stopwatch for animating scene state without coupling to the
//! host's frame loop.

mod clock;

pub use clock::Clock;
