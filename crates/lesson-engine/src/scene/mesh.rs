use glam::Vec3;

use crate::paint::Color;

/// Axis-aligned box centered on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Scale that maps the unit cube onto this box.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Unlit, single-color material.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    /// Draw edges only.
    pub wireframe: bool,
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color, wireframe: false }
    }
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: BasicMaterial,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self { geometry, material }
    }
}
