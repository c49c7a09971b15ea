//! Camera controls advanced once per animation frame.

mod orbit;

pub use orbit::OrbitControls;

use crate::camera::PerspectiveCamera;

/// A component that moves a camera and needs one `update` per frame.
pub trait CameraControls {
    /// Advances internal state by one tick and applies it to `camera`.
    ///
    /// Returns `true` if the camera moved.
    fn update(&mut self, camera: &mut PerspectiveCamera) -> bool;
}
