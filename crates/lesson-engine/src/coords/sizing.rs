use winit::dpi::PhysicalSize;

/// Current viewport size in logical pixels.
///
/// Mutated by the resize listener on every host resize and once at setup.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Sizing {
    pub width: u32,
    pub height: u32,
}

impl Sizing {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, as used for the camera's aspect ratio.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// True when either dimension is zero (e.g. a minimized window).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Drawing-buffer size for a given pixel ratio, rounded to whole pixels.
    pub fn to_physical(self, pixel_ratio: f64) -> PhysicalSize<u32> {
        let scale = |v: u32| (f64::from(v) * pixel_ratio).round().max(0.0) as u32;
        PhysicalSize::new(scale(self.width), scale(self.height))
    }
}

/// Caps a device pixel ratio to bound render cost on high-density displays.
///
/// Non-finite or non-positive ratios fall back to `1.0`.
#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0;
    }
    device_pixel_ratio.min(max)
}
