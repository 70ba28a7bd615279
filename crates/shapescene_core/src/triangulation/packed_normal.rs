use std::f64::consts::PI;

use shapescene_math::DVec3;

/// Number of grid steps per full turn of the packing sphere.
const PACK_SIZE: f64 = 252.0;

/// A unit normal quantised to two bytes of longitude/latitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedNormal {
    pub u: u8,
    pub v: u8,
}

impl PackedNormal {
    pub fn new(u: u8, v: u8) -> Self {
        Self { u, v }
    }

    /// Expand into a unit vector.
    pub fn to_vector(self) -> DVec3 {
        let lon = f64::from(self.u) / PACK_SIZE * PI * 2.0;
        let lat = f64::from(self.v) / PACK_SIZE * PI;

        DVec3::new(lon.sin() * lat.sin(), lat.cos(), lon.cos() * lat.sin())
    }

    /// Quantise a direction. Zero-length input packs as the pole (+Y).
    pub fn from_vector(normal: DVec3) -> Self {
        let n = normal.try_normalize().unwrap_or(DVec3::Y);

        let lat = n.y.clamp(-1.0, 1.0).acos();
        let mut lon = n.x.atan2(n.z);
        if lon < 0.0 {
            lon += PI * 2.0;
        }

        let u = (lon / (PI * 2.0) * PACK_SIZE).round() as u32 % PACK_SIZE as u32;
        let v = (lat / PI * PACK_SIZE).round() as u32;

        Self {
            u: u as u8,
            v: v.min(PACK_SIZE as u32) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_axis_directions_are_exact() {
        for axis in [DVec3::X, DVec3::Y, DVec3::Z, -DVec3::X, -DVec3::Y, -DVec3::Z] {
            assert_close(PackedNormal::from_vector(axis).to_vector(), axis);
        }
    }

    #[test]
    fn test_z_up_packing() {
        let packed = PackedNormal::from_vector(DVec3::Z);
        assert_eq!(packed, PackedNormal::new(0, 126));
    }

    #[test]
    fn test_quantisation_error_is_small() {
        let n = DVec3::new(0.3, -0.4, 0.866).normalize();
        let back = PackedNormal::from_vector(n).to_vector();
        // Grid step is 2*pi/252, so the angular error stays below a couple of degrees
        assert!(n.dot(back) > 0.999);
    }

    #[test]
    fn test_zero_vector_packs_as_pole() {
        assert_close(PackedNormal::from_vector(DVec3::ZERO).to_vector(), DVec3::Y);
    }
}
