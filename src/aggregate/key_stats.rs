//! Running statistics for one key

/// Min, max, sum and count of every value folded into one key.
///
/// The mean is never stored; see [`KeyStats::mean`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl KeyStats {
    /// Stats for a key's first observation
    pub fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    /// Fold one more observation in
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// `sum / count`, or 0.0 for an entry with no observations.
    ///
    /// Rounding drift in `sum` can push the quotient just past the observed
    /// bounds, so the result is clamped to `[min, max]`.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sum / self.count as f64).max(self.min).min(self.max)
        }
    }
}
