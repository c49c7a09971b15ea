//! Frame timing.
//!
//! One `FrameClock` per window; the runtime ticks it once per delivered frame
//! and hands the resulting `FrameTime` to the animation driver.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
