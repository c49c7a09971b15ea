//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the lesson window, and routes host events
//! to the lesson's signals, input state and animation chain.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
