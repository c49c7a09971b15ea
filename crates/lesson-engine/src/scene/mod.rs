//! 3D scene graph.
//!
//! A `Scene` is a flat root holding meshes and line sets; cameras are
//! attached by id. Transforms use render-side (`glam`) math.

mod graph;
mod helpers;
mod lines;
mod mesh;
mod object;

pub use graph::Scene;
pub use helpers::AxisGridHelper;
pub use lines::{LineSegments, LineVertex};
pub use mesh::{BasicMaterial, BoxGeometry, Mesh};
pub use object::{Object3D, ObjectId, ObjectKind, Transform};
