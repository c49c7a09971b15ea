//! Per-frame callback chain driven by host frame deliveries.
//!
//! The driver is either Idle (no callback) or Armed. While armed and
//! started, each delivered frame runs the callback, updates camera
//! controls, renders, and requests the next frame. Disarming clears the
//! pending request, so the next delivery does nothing.

use anyhow::Result;

use crate::camera::PerspectiveCamera;
use crate::controls::CameraControls;
use crate::debug::DebugPanel;
use crate::host::FrameScheduler;
use crate::input::InputState;
use crate::render::Renderer;
use crate::scene::Scene;
use crate::stage::Stage;
use crate::time::FrameTime;

/// What a frame callback sees.
pub struct FrameScope<'a> {
    pub time: FrameTime,
    pub scene: &'a mut Scene,
    pub camera: &'a mut PerspectiveCamera,
    pub input: &'a InputState,
    pub panel: Option<&'a DebugPanel>,
}

pub type FrameCallback = Box<dyn FnMut(&mut FrameScope<'_>)>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Nothing was pending; the delivery was ignored.
    Idle,
    /// The callback ran, a frame was drawn and the next one requested.
    Rendered,
}

#[derive(Default)]
pub struct AnimationDriver {
    callback: Option<FrameCallback>,
    pending: bool,
    frames: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-frame callback, replacing any previous one.
    ///
    /// A chain already running picks the new callback up on its next frame.
    pub fn arm(&mut self, callback: impl FnMut(&mut FrameScope<'_>) + 'static) {
        if self.callback.is_some() {
            log::debug!("animation callback replaced");
        } else {
            log::info!("animation armed");
        }
        self.callback = Some(Box::new(callback));
    }

    /// Drops the callback and any frame already requested.
    pub fn disarm(&mut self) {
        if self.callback.take().is_some() {
            log::info!("animation disarmed after {} frames", self.frames);
        }
        self.pending = false;
    }

    pub fn is_armed(&self) -> bool {
        self.callback.is_some()
    }

    /// True while a requested frame has not been delivered yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Frames rendered by this driver.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forgets a requested frame that the host delivered but nothing could draw.
    pub fn drop_delivery(&mut self) {
        self.pending = false;
    }

    /// Requests the first frame of a chain.
    ///
    /// Does nothing when idle or when a frame is already pending.
    pub fn start(&mut self, scheduler: &dyn FrameScheduler) -> bool {
        if self.callback.is_none() {
            log::debug!("animation start ignored: no callback armed");
            return false;
        }
        if self.pending {
            log::debug!("animation start ignored: frame already pending");
            return false;
        }

        self.pending = true;
        scheduler.request_frame();
        log::info!("animation started");
        true
    }

    /// Handles one delivered frame.
    ///
    /// A render error ends the chain: no further frame is requested.
    pub fn frame<R: Renderer>(
        &mut self,
        time: FrameTime,
        stage: &mut Stage<R>,
        controls: Option<&mut dyn CameraControls>,
        input: &InputState,
        panel: Option<&DebugPanel>,
        scheduler: &dyn FrameScheduler,
    ) -> Result<FrameOutcome> {
        if !self.pending {
            return Ok(FrameOutcome::Idle);
        }
        let Some(callback) = self.callback.as_mut() else {
            self.pending = false;
            return Ok(FrameOutcome::Idle);
        };
        self.pending = false;

        let mut scope = FrameScope {
            time,
            scene: &mut stage.scene,
            camera: &mut stage.camera,
            input,
            panel,
        };
        callback(&mut scope);

        if let Some(controls) = controls {
            controls.update(&mut stage.camera);
        }

        stage.render()?;
        self.frames += 1;

        self.pending = true;
        scheduler.request_frame();
        Ok(FrameOutcome::Rendered)
    }
}
