use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Quat, Vec3};

use super::lines::LineSegments;
use super::mesh::Mesh;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for scene objects and cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Position, rotation and scale of an object relative to the scene root.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Local-to-world matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What an object draws as.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Mesh(Mesh),
    Lines(LineSegments),
}

/// A node in the scene.
#[derive(Debug, Clone)]
pub struct Object3D {
    id: ObjectId,
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    /// Objects draw in ascending `render_order` within their pass.
    pub render_order: i32,
    pub kind: ObjectKind,
}

impl Object3D {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::new(),
            name: String::new(),
            transform: Transform::IDENTITY,
            visible: true,
            render_order: 0,
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            ObjectKind::Lines(_) => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            ObjectKind::Lines(_) => None,
        }
    }
}

impl From<Mesh> for Object3D {
    fn from(mesh: Mesh) -> Self {
        Self::new(ObjectKind::Mesh(mesh))
    }
}

impl From<LineSegments> for Object3D {
    fn from(lines: LineSegments) -> Self {
        Self::new(ObjectKind::Lines(lines))
    }
}
