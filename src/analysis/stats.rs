//! Descriptive statistics for numeric series.

use crate::models::Distribution;

impl Distribution {
    /// Compute statistics over a float series. Returns `None` when empty.
    pub fn from_scores(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let total: f64 = sorted.iter().sum();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            total,
            mean: total / count as f64,
            median,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// Compute statistics over a count series.
    pub fn from_counts(values: &[usize]) -> Option<Self> {
        let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self::from_scores(&as_f64)
    }
}
