use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;

use super::CameraControls;

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Orbits a camera around a target point.
///
/// Input (`rotate*`, `zoom*`) accumulates; `update` applies it. With damping
/// enabled only `damping_factor` of the pending rotation is applied per tick
/// and the rest decays, so motion eases out over following frames.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per tick when damping (0..=1).
    pub damping_factor: f32,

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_rotate: true,
            enable_zoom: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: Vec3) -> Self {
        Self { target, ..Self::default() }
    }

    /// Queues a rotation: `theta` around the up axis, `phi` towards the poles.
    pub fn rotate(&mut self, theta: f32, phi: f32) {
        if self.enable_rotate {
            self.delta_theta -= theta * self.rotate_speed;
            self.delta_phi -= phi * self.rotate_speed;
        }
    }

    /// Queues a rotation from a pointer drag; dragging the full viewport
    /// height turns the camera once around.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.rotate(TAU * dx / h, TAU * dy / h);
    }

    /// Positive `lines` (wheel away from the user) moves closer.
    pub fn zoom_by_wheel(&mut self, lines: f32) {
        if self.enable_zoom && lines != 0.0 {
            self.scale *= 0.95_f32.powf(self.zoom_speed * lines);
        }
    }

    /// True while queued or damped motion remains.
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > 1e-6 || self.delta_phi.abs() > 1e-6 || self.scale != 1.0
    }

    /// Drops any queued motion.
    pub fn reset(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }
}

impl CameraControls for OrbitControls {
    fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.reset();
            return false;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let step = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.delta_theta * step;
        phi = (phi + self.delta_phi * step).clamp(POLE_EPSILON, PI - POLE_EPSILON);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );

        let moved = !new_offset.abs_diff_eq(offset, 1e-6);
        camera.position = self.target + new_offset;
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        moved
    }
}
