// Transform utilities for DMat4
//
// Extends glam::DMat4 with the checks and normal handling needed when baking
// placements into vertex data.
// Note: glam::DMat4 already provides transform_point3() and inverse()

use glam::{DMat3, DMat4};

/// Extension trait for DMat4 placement matrices.
pub trait DMat4Ext {
    /// True if every element is finite (no NaN or infinity).
    fn is_finite_placement(&self) -> bool;

    /// Matrix that maps surface normals under this placement.
    ///
    /// The inverse-transpose of the linear part, or the linear part itself
    /// when it is singular.
    fn normal_matrix(&self) -> DMat3;
}

impl DMat4Ext for DMat4 {
    fn is_finite_placement(&self) -> bool {
        self.to_cols_array().iter().all(|v| v.is_finite())
    }

    fn normal_matrix(&self) -> DMat3 {
        let linear = DMat3::from_mat4(*self);
        let det = linear.determinant();
        if det.abs() > f64::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn placed_normal(mat: DMat4, normal: DVec3) -> DVec3 {
        (mat.normal_matrix() * normal).normalize()
    }

    #[test]
    fn test_identity_is_finite() {
        assert!(DMat4::IDENTITY.is_finite_placement());
    }

    #[test]
    fn test_nan_is_not_finite() {
        let mut cols = DMat4::IDENTITY.to_cols_array();
        cols[13] = f64::NAN;
        assert!(!DMat4::from_cols_array(&cols).is_finite_placement());

        cols[13] = f64::INFINITY;
        assert!(!DMat4::from_cols_array(&cols).is_finite_placement());
    }

    #[test]
    fn test_normal_ignores_translation() {
        let mat = DMat4::from_translation(DVec3::new(10.0, 20.0, 30.0));
        let n = placed_normal(mat, DVec3::Z);
        assert!((n - DVec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_normal_under_non_uniform_scale() {
        // Plane x + y = 0 has normal (1, 1, 0)/sqrt(2); scaling x by 2 tilts it
        let mat = DMat4::from_scale(DVec3::new(2.0, 1.0, 1.0));
        let n = placed_normal(mat, DVec3::new(1.0, 1.0, 0.0).normalize());
        let expected = DVec3::new(0.5, 1.0, 0.0).normalize();
        assert!((n - expected).length() < 1e-9);
    }

    #[test]
    fn test_normal_rotation() {
        use std::f64::consts::PI;

        let mat = DMat4::from_rotation_z(PI / 2.0);
        let n = placed_normal(mat, DVec3::X);
        assert!((n - DVec3::Y).length() < 1e-9);
    }

    #[test]
    fn test_singular_matrix_keeps_linear_part() {
        let mat = DMat4::from_scale(DVec3::new(1.0, 1.0, 0.0));
        let n = placed_normal(mat, DVec3::X);
        assert!((n - DVec3::X).length() < 1e-9);
    }
}
