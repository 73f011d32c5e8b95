use crate::aggregate::KeyStats;

/// Derived min/mean/max for one key, ready for formatting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Summary {
    pub const ZERO: Summary = Summary {
        min: 0.0,
        mean: 0.0,
        max: 0.0,
    };

    /// Summary of running stats. An entry without observations is all zeros.
    pub fn from_stats(stats: &KeyStats) -> Self {
        if stats.count == 0 {
            return Self::ZERO;
        }
        Self {
            min: stats.min,
            mean: stats.mean(),
            max: stats.max,
        }
    }

    /// Summary recomputed from raw samples
    pub fn from_samples(values: &[f64]) -> Self {
        Self::from_stats(&stats_from_samples(values))
    }
}

/// Rebuild running stats from raw samples, folding in order.
///
/// An empty slice gives a zeroed entry with `count == 0`.
pub fn stats_from_samples(values: &[f64]) -> KeyStats {
    match values.split_first() {
        None => KeyStats {
            min: 0.0,
            max: 0.0,
            sum: 0.0,
            count: 0,
        },
        Some((&first, rest)) => {
            let mut stats = KeyStats::new(first);
            for &value in rest {
                stats.add(value);
            }
            stats
        }
    }
}
