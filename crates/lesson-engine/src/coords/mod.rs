//! Viewport sizing shared by the renderer, camera and resize listener.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware), matching the host window's inner size
//! - Physical drawing-buffer size is derived as `logical * pixel_ratio`

mod sizing;

pub use sizing::{clamp_pixel_ratio, Sizing};
