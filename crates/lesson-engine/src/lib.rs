//! Lesson engine crate.
//!
//! Sets up a renderer, scene and camera inside a winit window, keeps them
//! sized to the window, and drives a per-frame animation chain with orderly
//! teardown. Also bridges render-side and physics-side math types.

pub mod animation;
pub mod camera;
pub mod controls;
pub mod coords;
pub mod core;
pub mod debug;
pub mod device;
pub mod host;
pub mod input;
pub mod lesson;
pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
pub mod stage;
pub mod time;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;
