// Re-export glam for convenience
pub use glam::*;

// Shapescene math types
mod aabb;
mod axis;
mod interval;
mod transform;

pub use aabb::Aabb;
pub use axis::{y_up_to_z_up, z_up_to_y_up};
pub use interval::Interval;
pub use transform::DMat4Ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_narrowing() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.as_vec3(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_identity_matrices_agree() {
        assert_eq!(DMat4::IDENTITY.as_mat4(), Mat4::IDENTITY);
    }
}
