use winit::window::Window;

use crate::coords::Sizing;

/// Read-only view of the window hosting the lesson surface.
pub trait HostWindow {
    /// Current inner size in logical pixels.
    fn inner_sizing(&self) -> Sizing;

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;
}

/// Host facility that delivers the next frame.
///
/// A request is one-shot: it yields exactly one frame delivery, and requests
/// made before that delivery coalesce.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl HostWindow for Window {
    fn inner_sizing(&self) -> Sizing {
        let logical = self.inner_size().to_logical::<f64>(self.scale_factor());
        Sizing::new(logical.width.round() as u32, logical.height.round() as u32)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.scale_factor()
    }
}

impl FrameScheduler for Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}
