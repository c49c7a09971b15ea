//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop)
//! and the lessons the studio ships.

mod app;

pub use app::{AppControl, Lesson, LessonCtx};
