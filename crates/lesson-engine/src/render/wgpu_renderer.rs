use std::sync::Arc;

use anyhow::Result;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::coords::Sizing;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::scene::Scene;

use super::scene_pass::ScenePass;
use super::{RenderCtx, RenderTarget, Renderer};

/// The window a `WgpuRenderer` presents into, plus GPU preferences.
#[derive(Clone)]
pub struct WgpuSurface {
    pub window: Arc<Window>,
    pub init: GpuInit,
}

impl WgpuSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            init: GpuInit::default(),
        }
    }

    pub fn with_init(mut self, init: GpuInit) -> Self {
        self.init = init;
        self
    }
}

/// `Renderer` backed by wgpu, presenting to a winit window.
pub struct WgpuRenderer {
    window: Arc<Window>,
    gpu: Gpu,
    sizing: Sizing,
    pixel_ratio: f64,
    pass: ScenePass,
}

impl WgpuRenderer {
    fn reconfigure(&mut self) {
        let physical = self.sizing.to_physical(self.pixel_ratio);
        if physical.width == 0 || physical.height == 0 {
            return;
        }
        self.gpu.resize(physical);
    }
}

impl Renderer for WgpuRenderer {
    type Surface = WgpuSurface;

    fn create(surface: WgpuSurface, sizing: Sizing) -> Result<Self> {
        let WgpuSurface { window, init } = surface;
        let gpu = pollster::block_on(Gpu::new(window.clone(), init, sizing.to_physical(1.0)))?;

        Ok(Self {
            window,
            gpu,
            sizing,
            pixel_ratio: 1.0,
            pass: ScenePass::default(),
        })
    }

    fn set_size(&mut self, sizing: Sizing) {
        self.sizing = sizing;
        self.reconfigure();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.reconfigure();
    }

    fn size(&self) -> Sizing {
        self.sizing
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        if self.sizing.is_empty() {
            return Ok(());
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    anyhow::bail!("surface lost and could not be recovered");
                }
                log::debug!("skipping frame: {action:?}");
                return Ok(());
            }
        };

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.pass
                .render(&rctx, &mut target, scene, camera, scene.background);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }
}
