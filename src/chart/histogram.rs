//! Histogram binning.

/// Integer series spanning more values than this are binned continuously.
pub const MAX_INTEGER_BINS: usize = 50;

/// Upper bound on the bin count of a continuous histogram.
pub const MAX_BINS: usize = 1000;

/// One histogram bucket covering `[lower, upper)`, or `[lower, upper]` for
/// the last bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// A binned series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    /// Whether every bin holds exactly one integer value.
    pub discrete: bool,
}

impl Histogram {
    /// One bin per integer value between the minimum and maximum.
    pub fn integer(values: &[usize]) -> Self {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self::default();
        };

        if max - min + 1 > MAX_INTEGER_BINS {
            let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            return Self::continuous(&as_f64, MAX_INTEGER_BINS);
        }

        let mut bins: Vec<Bin> = (min..=max)
            .map(|v| Bin {
                lower: v as f64,
                upper: (v + 1) as f64,
                count: 0,
            })
            .collect();

        for &v in values {
            bins[v - min].count += 1;
        }

        Self {
            bins,
            discrete: true,
        }
    }

    /// `bins` equal-width bins over `[min, max]`, clamped to `1..=MAX_BINS`.
    pub fn continuous(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self::default();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                bins: vec![Bin {
                    lower: min,
                    upper: max,
                    count: finite.len(),
                }],
                discrete: false,
            };
        }

        let n = bins.clamp(1, MAX_BINS);
        let width = (max - min) / n as f64;
        let mut out: Vec<Bin> = (0..n)
            .map(|i| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == n {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = (((v - min) / width) as usize).min(n - 1);
            out[idx].count += 1;
        }

        Self {
            bins: out,
            discrete: false,
        }
    }

    /// Sum of every bin count.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Axis labels, one per bin.
    pub fn labels(&self) -> Vec<String> {
        self.bins
            .iter()
            .map(|b| {
                if self.discrete {
                    format!("{}", b.lower as usize)
                } else {
                    format!("{:.2}", b.lower)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_histogram() {
        let hist = Histogram::integer(&[2, 1, 2, 0, 5]);
        assert!(hist.discrete);
        assert_eq!(hist.bins.len(), 6);
        assert_eq!(
            hist.bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 1, 2, 0, 0, 1]
        );
        assert_eq!(hist.labels()[0], "0");
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn test_integer_histogram_wide_range_falls_back() {
        let values: Vec<usize> = (0..200).collect();
        let hist = Histogram::integer(&values);
        assert!(!hist.discrete);
        assert_eq!(hist.bins.len(), MAX_INTEGER_BINS);
        assert_eq!(hist.total(), 200);
    }

    #[test]
    fn test_continuous_histogram_max_in_last_bin() {
        let hist = Histogram::continuous(&[0.0, 0.25, 0.5, 0.75, 1.0], 4);
        assert_eq!(hist.bins.len(), 4);
        assert_eq!(
            hist.bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 1, 1, 2]
        );
        assert_eq!(hist.bins[3].upper, 1.0);
    }

    #[test]
    fn test_continuous_histogram_constant_values() {
        let hist = Histogram::continuous(&[0.5, 0.5, 0.5], 20);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(Histogram::integer(&[]).bins.is_empty());
        assert!(Histogram::continuous(&[], 10).bins.is_empty());

        let hist = Histogram::continuous(&[f64::NAN, 0.1, 0.9], 2);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_zero_bins_treated_as_one() {
        let hist = Histogram::continuous(&[0.1, 0.9], 0);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_huge_bin_count_is_clamped() {
        let hist = Histogram::continuous(&[0.1, 0.9], usize::MAX);
        assert_eq!(hist.bins.len(), MAX_BINS);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.bins[MAX_BINS - 1].count, 1);
    }
}
