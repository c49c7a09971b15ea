//! Host-window seams.
//!
//! The lesson lifecycle never talks to winit directly; it sees the host as:
//! - a `HostWindow` to read sizing and device pixel ratio from
//! - a `FrameScheduler` to request the next frame
//! - a `WindowSignals` registry to subscribe to window events
//!
//! `winit::window::Window` implements the first two; the runtime owns the
//! signals registry and emits into it.

mod environment;
mod listeners;
mod signals;
mod window;

pub use environment::Environment;
pub use listeners::WindowListeners;
pub use signals::{ListenerHandle, WindowEventKind, WindowListener, WindowSignals};
pub use window::{FrameScheduler, HostWindow};
