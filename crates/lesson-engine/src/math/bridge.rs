//! Field-wise conversions between render and physics vector/quaternion types.
//!
//! No normalization or validation happens here; a non-unit quaternion stays
//! non-unit on the other side.

use glam::{Quat, Vec3};

use super::{PhysicsQuaternion, PhysicsVector};

#[inline]
pub fn to_physics_vector(v: Vec3) -> PhysicsVector {
    PhysicsVector::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_render_vector(v: &PhysicsVector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// `glam` stores `(x, y, z, w)`; `nalgebra` names the imaginary part `(i, j, k)`.
#[inline]
pub fn to_physics_quaternion(q: Quat) -> PhysicsQuaternion {
    PhysicsQuaternion::new(q.w, q.x, q.y, q.z)
}

#[inline]
pub fn to_render_quaternion(q: &PhysicsQuaternion) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_fields_map_by_name() {
        let p = to_physics_vector(Vec3::new(1.0, -2.5, 3.25));
        assert_eq!((p.x, p.y, p.z), (1.0, -2.5, 3.25));
    }

    #[test]
    fn quaternion_keeps_w_as_real_part() {
        let p = to_physics_quaternion(Quat::from_xyzw(0.1, 0.2, 0.3, 0.9));
        assert_eq!((p.i, p.j, p.k, p.w), (0.1, 0.2, 0.3, 0.9));
        assert_eq!(p.scalar(), 0.9);
    }

    #[test]
    fn vector_round_trip_is_exact() {
        for v in [
            Vec3::ZERO,
            Vec3::new(1.0e-7, -3.4e38, 42.0),
            Vec3::new(f32::MIN_POSITIVE, 0.1, -0.0),
        ] {
            assert_eq!(to_render_vector(&to_physics_vector(v)), v);
        }
        let p = PhysicsVector::new(7.5, -0.125, 9.0);
        assert_eq!(to_physics_vector(to_render_vector(&p)), p);
    }

    #[test]
    fn quaternion_round_trip_is_exact_without_normalizing() {
        // Deliberately non-unit.
        let q = Quat::from_xyzw(2.0, -1.0, 0.5, 3.0);
        assert_eq!(to_render_quaternion(&to_physics_quaternion(q)), q);

        let p = PhysicsQuaternion::new(0.25, 0.5, -0.75, 1.5);
        assert_eq!(to_physics_quaternion(to_render_quaternion(&p)), p);
    }
}
