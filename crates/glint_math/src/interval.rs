/// A closed range of ray parameters.
///
/// `min <= max` is expected but not enforced; an inverted interval simply
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing (min > max).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Contains every finite value.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive test: `min <= x <= max`.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive test: `min < x < max`. Used to accept intersection roots.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x into [min, max]. Panics on an inverted or NaN interval.
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound.
    ///
    /// Nearest-hit searches call this to shrink the window as closer hits turn up.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
