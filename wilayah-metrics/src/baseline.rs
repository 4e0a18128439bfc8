//! Dataset-wide regional activity baseline.
//!
//! The Location Quotient compares an item's regional share against the
//! region's share of all transactions. That denominator is global state:
//! it is computed exactly once from the full dataset and then passed,
//! immutable, into every per-item scoring call.

/// Per-region share of all unique transactions in the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBaseline {
    shares: Vec<f64>,
}

impl RegionBaseline {
    /// Build the baseline from per-region unique-transaction totals and the
    /// dataset grand total.
    ///
    /// A zero grand total yields all-zero shares; callers short-circuit such
    /// datasets before any per-item scoring, so no division happens here
    /// either.
    pub fn from_totals(region_totals: &[u64], grand_total: u64) -> Self {
        let shares = if grand_total == 0 {
            vec![0.0; region_totals.len()]
        } else {
            region_totals
                .iter()
                .map(|&t| t as f64 / grand_total as f64)
                .collect()
        };
        Self { shares }
    }

    /// The baseline share for a region index, 0.0 when out of range.
    pub fn share(&self, region_idx: usize) -> f64 {
        self.shares.get(region_idx).copied().unwrap_or(0.0)
    }

    /// Number of regions covered by this baseline.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_one_for_partitioned_totals() {
        let b = RegionBaseline::from_totals(&[40, 30, 20, 10], 100);
        let sum: f64 = (0..4).map(|i| b.share(i)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((b.share(0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn zero_grand_total_gives_zero_shares() {
        let b = RegionBaseline::from_totals(&[0, 0, 0], 0);
        assert_eq!(b.share(0), 0.0);
        assert_eq!(b.share(2), 0.0);
    }

    #[test]
    fn out_of_range_index_is_zero() {
        let b = RegionBaseline::from_totals(&[10], 10);
        assert_eq!(b.share(5), 0.0);
    }
}
