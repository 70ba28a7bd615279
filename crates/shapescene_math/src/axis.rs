//! Up-axis conversion between building models and render scenes.
//!
//! Building models are Z-up; the render scene is Y-up. The conversion swaps
//! the second and third components, which is its own inverse.

use glam::DVec3;

/// Remap a Z-up position or direction into the Y-up scene convention.
#[inline]
pub fn z_up_to_y_up(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

/// Inverse of [`z_up_to_y_up`].
#[inline]
pub fn y_up_to_z_up(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}
