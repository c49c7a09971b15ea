//! Math glue between the render-side (`glam`) and physics-side (`nalgebra`) types.

pub mod bridge;

pub use bridge::{to_physics_quaternion, to_physics_vector, to_render_quaternion, to_render_vector};

/// Physics-side vector type.
pub type PhysicsVector = nalgebra::Vector3<f32>;

/// Physics-side quaternion type.
pub type PhysicsQuaternion = nalgebra::Quaternion<f32>;
