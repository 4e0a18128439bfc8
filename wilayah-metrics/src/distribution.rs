//! Per-item distribution scoring.

use serde::Serialize;

use crate::baseline::RegionBaseline;
use crate::entropy::normalized_entropy;

/// The scored distribution of one item's transactions across regions.
///
/// Region identity is positional: index `i` here refers to the same region
/// as index `i` in the count slice and the baseline.
#[derive(Clone, Debug, Serialize)]
pub struct DistributionMetrics {
    /// Sum of per-region unique-transaction counts.
    pub total: u64,
    /// Number of regions with at least one transaction.
    pub presence_count: usize,
    /// Shannon entropy of the regional distribution, normalized to [0, 1].
    pub h_norm: f64,
    /// Share of the single most active region.
    pub max_share: f64,
    /// All region indices attaining `max_share`. Ties are kept, not broken.
    pub dominant_regions: Vec<usize>,
    /// Maximum Location Quotient across regions where the item is present.
    pub lq_max: f64,
}

/// Score one item's per-region transaction counts against the dataset
/// baseline.
///
/// A zero-total item gets all-zero metrics and an empty dominant set; the
/// classifier routes such items to Low-Volume before any of these numbers
/// are consulted, so no division by zero can occur downstream either.
pub fn score(counts: &[u64], baseline: &RegionBaseline) -> DistributionMetrics {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return DistributionMetrics {
            total: 0,
            presence_count: 0,
            h_norm: 0.0,
            max_share: 0.0,
            dominant_regions: Vec::new(),
            lq_max: 0.0,
        };
    }

    let presence_count = counts.iter().filter(|&&c| c > 0).count();
    let h_norm = normalized_entropy(counts);

    // Dominance ties are resolved on the integer counts, not on the derived
    // float shares, so equal counts always tie exactly.
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let dominant_regions: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == max_count && c > 0)
        .map(|(i, _)| i)
        .collect();
    let max_share = max_count as f64 / total as f64;

    let lq_max = counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(i, &c)| {
            let p = c as f64 / total as f64;
            let base = baseline.share(i);
            if base > 0.0 {
                p / base
            } else {
                0.0
            }
        })
        .fold(0.0f64, f64::max);

    DistributionMetrics {
        total,
        presence_count,
        h_norm,
        max_share,
        dominant_regions,
        lq_max,
    }
}
