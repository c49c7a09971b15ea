//! Lesson lifecycle: scene setup, resize handling, animation and teardown.
//!
//! A `LessonSetup` is the per-lesson instance the runtime owns. It is set up
//! once a drawing surface exists, driven frame by frame, and torn down when
//! the window closes.

mod config;
mod error;
mod setup;

pub use config::LessonConfig;
pub use error::SetupError;
pub use setup::{LessonSetup, SetupCtx};
