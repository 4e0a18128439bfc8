//! Shannon entropy over regional transaction counts.

/// Raw Shannon entropy (natural log) of a count distribution.
///
/// Only nonzero counts contribute. A distribution with zero total has no
/// information content and returns 0.0 rather than NaN.
pub fn shannon_entropy(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum()
}

/// Entropy normalized to [0, 1] by `ln(k)`, where `k` is the number of
/// regions with a nonzero count.
///
/// A single-region distribution has zero diversity by convention, not an
/// undefined 0/0.
pub fn normalized_entropy(counts: &[u64]) -> f64 {
    let k = counts.iter().filter(|&&c| c > 0).count();
    if k <= 1 {
        return 0.0;
    }
    shannon_entropy(counts) / (k as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_has_zero_entropy() {
        assert_eq!(shannon_entropy(&[0, 0, 0]), 0.0);
        assert_eq!(normalized_entropy(&[0, 0, 0]), 0.0);
    }

    #[test]
    fn single_region_has_zero_normalized_entropy() {
        assert_eq!(normalized_entropy(&[40, 0, 0, 0, 0, 0]), 0.0);
        assert_eq!(shannon_entropy(&[40, 0, 0, 0, 0, 0]), 0.0);
    }

    #[test]
    fn uniform_distribution_has_unit_normalized_entropy() {
        let h = normalized_entropy(&[20, 20, 20, 20, 20]);
        assert!((h - 1.0).abs() < 1e-12, "h_norm was {}", h);
    }

    #[test]
    fn uniform_over_two_regions_is_also_unit() {
        // Normalization uses the number of occupied regions, not the number
        // of count slots, so trailing zeros do not dilute the score.
        let h = normalized_entropy(&[50, 50, 0, 0, 0, 0]);
        assert!((h - 1.0).abs() < 1e-12, "h_norm was {}", h);
    }

    #[test]
    fn skewed_distribution_is_strictly_between_zero_and_one() {
        let h = normalized_entropy(&[90, 5, 5]);
        assert!(h > 0.0 && h < 1.0, "h_norm was {}", h);
    }

    #[test]
    fn raw_entropy_matches_hand_computation() {
        // [50, 30, 20]: H = -(0.5 ln 0.5 + 0.3 ln 0.3 + 0.2 ln 0.2)
        let expected = -(0.5f64 * 0.5f64.ln() + 0.3 * 0.3f64.ln() + 0.2 * 0.2f64.ln());
        let h = shannon_entropy(&[50, 30, 20]);
        assert!((h - expected).abs() < 1e-12);
    }
}
