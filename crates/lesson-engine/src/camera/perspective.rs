use glam::{Mat4, Vec3};

use crate::scene::ObjectId;

/// Perspective projection camera.
///
/// Changing `fov`, `aspect`, `near` or `far` does not affect
/// `projection_matrix()` until `update_projection_matrix()` is called.
/// The view matrix is always derived from the current position/target.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    id: ObjectId,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            id: ObjectId::new(),
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Moves the camera, keeping the same viewing direction.
    pub fn set_position(&mut self, position: Vec3) {
        let direction = self.target - self.position;
        self.position = position;
        self.target = position + direction;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Recomputes the projection from `fov`, `aspect`, `near` and `far`.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Distance along the viewing direction, for back-to-front sorting.
    pub fn view_depth(&self, point: Vec3) -> f32 {
        -self.view_matrix().transform_point3(point).z
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 100.0)
    }
}
