//! CPU-side vertex data shared by the scene pass.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::paint::Color;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(super) fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    pub(super) fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color: color.to_array(),
        }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-object model matrix (column-major) and material tint.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct Instance {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl Instance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4, // model column 0
        3 => Float32x4, // model column 1
        4 => Float32x4, // model column 2
        5 => Float32x4, // model column 3
        6 => Float32x4  // tint
    ];

    pub(super) fn new(model: Mat4, tint: Color) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }

    pub(super) fn identity() -> Self {
        Self::new(Mat4::IDENTITY, Color::WHITE)
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit cube faces, corners counter-clockwise seen from outside.
const FACES: [[[f32; 3]; 4]; 6] = [
    [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]], // +X
    [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]], // -X
    [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]], // +Y
    [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]], // -Y
    [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]], // +Z
    [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]], // -Z
];

/// Unit cube as a triangle list (36 vertices).
pub(super) fn box_triangles() -> Vec<Vertex> {
    FACES
        .iter()
        .flat_map(|face| [0, 1, 2, 0, 2, 3].map(|i| Vertex::new(Vec3::from(face[i]), Color::WHITE)))
        .collect()
}

/// Unit cube edges as a line list (12 edges, 24 vertices).
pub(super) fn box_edges() -> Vec<Vertex> {
    let corner = |x: f32, y: f32, z: f32| Vertex::new(Vec3::new(x, y, z) * 0.5, Color::WHITE);
    let mut out = Vec::with_capacity(24);
    for s in [-1.0, 1.0] {
        for t in [-1.0, 1.0] {
            out.extend([corner(-1.0, s, t), corner(1.0, s, t)]);
            out.extend([corner(s, -1.0, t), corner(s, 1.0, t)]);
            out.extend([corner(s, t, -1.0), corner(s, t, 1.0)]);
        }
    }
    out
}
