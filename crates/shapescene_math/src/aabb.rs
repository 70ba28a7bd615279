use serde::{Deserialize, Serialize};

use crate::{Interval, Vec3};

/// Axis-aligned bounding box of scene-space positions.
///
/// No padding is applied: a flat primitive keeps a zero-width extent on its
/// flat axis.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Smallest box containing every position, or an empty box for no positions.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Vec3>) -> Self {
        positions
            .into_iter()
            .fold(Self::EMPTY, |aabb, p| aabb.include_point(*p))
    }

    /// Box covering both `a` and `b`.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Grow the box so that it includes `p`.
    pub fn include_point(&self, p: Vec3) -> Self {
        Self {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Edge lengths along each axis (zero when empty).
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
