use serde::{Deserialize, Serialize};

/// Extent of a set of scene coordinates along one axis.
///
/// Starts out empty (`min > max`) and grows as coordinates are folded in.
/// Serialized as `[min, max]`, or `null` when empty, since the infinite
/// sentinels of [`Interval::EMPTY`] have no JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<[f32; 2]>", into = "Option<[f32; 2]>")]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Length covered, zero for an empty interval.
    pub fn size(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Widen to cover `x`.
    pub fn include(&self, x: f32) -> Interval {
        Interval::new(self.min.min(x), self.max.max(x))
    }

    /// Smallest interval covering both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// Covers nothing; the identity for `include` and `surrounding`.
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Option<[f32; 2]>> for Interval {
    fn from(range: Option<[f32; 2]>) -> Self {
        range.map_or(Self::EMPTY, |[min, max]| Self::new(min, max))
    }
}

impl From<Interval> for Option<[f32; 2]> {
    fn from(interval: Interval) -> Self {
        (!interval.is_empty()).then_some([interval.min, interval.max])
    }
}
