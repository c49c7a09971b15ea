//! In-memory stand-ins for the host window, frame scheduler and renderer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;

use crate::camera::PerspectiveCamera;
use crate::coords::Sizing;
use crate::host::{FrameScheduler, HostWindow};
use crate::render::Renderer;
use crate::scene::Scene;
use crate::time::FrameTime;

/// Shared, ordered record of what collaborators did.
pub(crate) type EventLog = Rc<RefCell<Vec<&'static str>>>;

pub(crate) fn frame_time(frame_index: u64) -> FrameTime {
    FrameTime {
        dt: 1.0 / 60.0,
        elapsed: frame_index as f64 / 60.0,
        now: Instant::now(),
        frame_index,
    }
}

pub(crate) struct FakeHost {
    sizing: Cell<Sizing>,
    dpr: Cell<f64>,
}

impl FakeHost {
    pub(crate) fn new(width: u32, height: u32, dpr: f64) -> Self {
        Self {
            sizing: Cell::new(Sizing::new(width, height)),
            dpr: Cell::new(dpr),
        }
    }

    pub(crate) fn set_size(&self, width: u32, height: u32) {
        self.sizing.set(Sizing::new(width, height));
    }

    pub(crate) fn set_dpr(&self, dpr: f64) {
        self.dpr.set(dpr);
    }
}

impl HostWindow for FakeHost {
    fn inner_sizing(&self) -> Sizing {
        self.sizing.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr.get()
    }
}

#[derive(Default)]
pub(crate) struct CountingScheduler {
    count: Cell<u32>,
    log: Option<EventLog>,
}

impl CountingScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn logging(log: &EventLog) -> Self {
        Self {
            count: Cell::new(0),
            log: Some(Rc::clone(log)),
        }
    }

    pub(crate) fn count(&self) -> u32 {
        self.count.get()
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&self) {
        self.count.set(self.count.get() + 1);
        if let Some(log) = &self.log {
            log.borrow_mut().push("schedule");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RendererCall {
    SetSize(Sizing),
    SetPixelRatio(f64),
}

#[derive(Default, Clone)]
pub(crate) struct RecordingSurface {
    log: Option<EventLog>,
    fail_create: bool,
}

impl RecordingSurface {
    pub(crate) fn logging(log: &EventLog) -> Self {
        Self {
            log: Some(Rc::clone(log)),
            fail_create: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            log: None,
            fail_create: true,
        }
    }
}

/// Renderer that draws nothing and remembers how it was configured.
pub(crate) struct RecordingRenderer {
    sizing: Sizing,
    pixel_ratio: f64,
    calls: Vec<RendererCall>,
    renders: u32,
    fail_renders: bool,
    log: Option<EventLog>,
}

impl RecordingRenderer {
    /// Configuration calls since creation, in order.
    pub(crate) fn calls(&self) -> Vec<RendererCall> {
        self.calls.clone()
    }

    pub(crate) fn renders(&self) -> u32 {
        self.renders
    }

    pub(crate) fn fail_renders(&mut self) {
        self.fail_renders = true;
    }
}

impl Renderer for RecordingRenderer {
    type Surface = RecordingSurface;

    fn create(surface: RecordingSurface, sizing: Sizing) -> Result<Self> {
        anyhow::ensure!(!surface.fail_create, "recording renderer refused to start");
        Ok(Self {
            sizing,
            pixel_ratio: 1.0,
            calls: Vec::new(),
            renders: 0,
            fail_renders: false,
            log: surface.log,
        })
    }

    fn set_size(&mut self, sizing: Sizing) {
        self.sizing = sizing;
        self.calls.push(RendererCall::SetSize(sizing));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
        self.calls.push(RendererCall::SetPixelRatio(ratio));
    }

    fn size(&self) -> Sizing {
        self.sizing
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<()> {
        anyhow::ensure!(!self.fail_renders, "surface lost");
        self.renders += 1;
        if let Some(log) = &self.log {
            log.borrow_mut().push("render");
        }
        Ok(())
    }
}
