use crate::coords::Sizing;
use crate::paint::Color;

/// Scene setup parameters.
#[derive(Debug, Clone)]
pub struct LessonConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,

    /// Distance of the camera from the origin along +Z.
    pub camera_distance: f32,

    pub near: f32,
    pub far: f32,

    /// Upper bound applied to the host's device pixel ratio.
    pub max_pixel_ratio: f64,

    pub clear_color: Color,

    /// Sizing used when setup runs without a resize listener.
    pub fallback_sizing: Sizing,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            camera_distance: 3.0,
            near: 0.1,
            far: 100.0,
            max_pixel_ratio: 2.0,
            clear_color: Color::BLACK,
            fallback_sizing: Sizing::new(1000, 750),
        }
    }
}
