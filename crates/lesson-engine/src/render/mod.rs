//! Rendering.
//!
//! `Renderer` is the seam the lesson lifecycle talks to: it owns the output
//! surface, knows its size and pixel ratio, and draws a scene from a camera.
//! `WgpuRenderer` is the production implementation.

mod ctx;
mod geometry;
mod scene_pass;
mod wgpu_renderer;

pub use ctx::{RenderCtx, RenderTarget};
pub use wgpu_renderer::{WgpuRenderer, WgpuSurface};

use anyhow::Result;

use crate::camera::PerspectiveCamera;
use crate::coords::Sizing;
use crate::scene::Scene;

/// A renderer bound to a drawable surface.
pub trait Renderer: Sized + 'static {
    /// What the renderer binds to at construction.
    type Surface;

    /// Creates a renderer drawing into `surface`, sized to `sizing` at pixel ratio 1.
    fn create(surface: Self::Surface, sizing: Sizing) -> Result<Self>;

    /// Sets the output size in logical pixels.
    fn set_size(&mut self, sizing: Sizing);

    /// Sets the physical-pixels-per-logical-pixel ratio of the drawing buffer.
    fn set_pixel_ratio(&mut self, ratio: f64);

    fn size(&self) -> Sizing;

    fn pixel_ratio(&self) -> f64;

    /// Draws one frame of `scene` as seen from `camera`.
    ///
    /// Transient surface problems skip the frame and return `Ok`; an error
    /// means the renderer cannot continue.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()>;
}
