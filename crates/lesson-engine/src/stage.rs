//! Renderer, scene and camera built by lesson setup.

use anyhow::Result;
use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::coords::Sizing;
use crate::lesson::LessonConfig;
use crate::render::Renderer;
use crate::scene::Scene;

/// The three collaborators a lesson draws with.
pub struct Stage<R: Renderer> {
    pub renderer: R,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}

impl<R: Renderer> Stage<R> {
    /// Creates the renderer, an empty scene, and a camera framing the origin.
    pub fn build(surface: R::Surface, sizing: Sizing, config: &LessonConfig) -> Result<Self> {
        let renderer = R::create(surface, sizing)?;

        let mut scene = Scene::new();
        scene.background = config.clear_color;

        let mut camera =
            PerspectiveCamera::new(config.fov_degrees, sizing.aspect(), config.near, config.far);
        camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
        camera.look_at(Vec3::ZERO);
        scene.attach_camera(camera.id());

        Ok(Self {
            renderer,
            scene,
            camera,
        })
    }

    /// Draws one frame.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Brings camera and renderer in line with a new host size.
    ///
    /// An empty size leaves both untouched.
    pub fn apply_resize(&mut self, sizing: Sizing, pixel_ratio: f64) {
        if sizing.is_empty() {
            log::debug!("ignoring empty resize {}x{}", sizing.width, sizing.height);
            return;
        }

        self.camera.aspect = sizing.aspect();
        self.camera.update_projection_matrix();
        self.renderer.set_size(sizing);
        self.renderer.set_pixel_ratio(pixel_ratio);
    }
}
