//! Centralized classification thresholds.
//!
//! Every numeric boundary used by the label rules lives here so that
//! sensitivity analysis means changing one struct, not hunting constants
//! across the codebase. Defaults are calibrated for the DKI Jakarta retail
//! ledger (5-6 wilayah, ~2,000 distinct items).

use serde::Serialize;
use thiserror::Error;

/// Minimum unique transactions before an item is classified at all.
pub const DEFAULT_N_MIN: u64 = 30;
/// Global rule: minimum number of regions the item must appear in.
pub const DEFAULT_GLOBAL_PRESENCE_MIN: usize = 4;
/// Global rule: minimum normalized entropy (evenness of spread).
pub const DEFAULT_GLOBAL_H_NORM_MIN: f64 = 0.70;
/// Global rule: maximum share any single region may hold.
pub const DEFAULT_GLOBAL_MAX_SHARE_MAX: f64 = 0.50;
/// Local rule: minimum share of the dominant region.
pub const DEFAULT_LOCAL_MAX_SHARE_MIN: f64 = 0.60;
/// Local rule: maximum normalized entropy.
pub const DEFAULT_LOCAL_H_NORM_MAX: f64 = 0.40;
/// Local rule: minimum peak Location Quotient.
pub const DEFAULT_LOCAL_LQ_MIN: f64 = 1.5;

/// Tunable rule thresholds for the item classifier.
#[derive(Clone, Debug, Serialize)]
pub struct ClassifierConfig {
    pub n_min: u64,
    pub global_presence_min: usize,
    pub global_h_norm_min: f64,
    pub global_max_share_max: f64,
    pub local_max_share_min: f64,
    pub local_h_norm_max: f64,
    pub local_lq_min: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            n_min: DEFAULT_N_MIN,
            global_presence_min: DEFAULT_GLOBAL_PRESENCE_MIN,
            global_h_norm_min: DEFAULT_GLOBAL_H_NORM_MIN,
            global_max_share_max: DEFAULT_GLOBAL_MAX_SHARE_MAX,
            local_max_share_min: DEFAULT_LOCAL_MAX_SHARE_MIN,
            local_h_norm_max: DEFAULT_LOCAL_H_NORM_MAX,
            local_lq_min: DEFAULT_LOCAL_LQ_MIN,
        }
    }
}

/// Configuration failures are fatal at startup, before any row is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("n_min must be at least 1 (zero-total items must route to Low-Volume)")]
    ZeroMinTransactions,

    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("local_lq_min must be positive and finite, got {0}")]
    InvalidLqThreshold(f64),
}

impl ClassifierConfig {
    /// Reject configurations the rule set cannot evaluate sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_min == 0 {
            return Err(ConfigError::ZeroMinTransactions);
        }
        let unit_bounded = [
            ("global_h_norm_min", self.global_h_norm_min),
            ("global_max_share_max", self.global_max_share_max),
            ("local_max_share_min", self.local_max_share_min),
            ("local_h_norm_max", self.local_h_norm_max),
        ];
        for (name, value) in unit_bounded {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if !self.local_lq_min.is_finite() || self.local_lq_min <= 0.0 {
            return Err(ConfigError::InvalidLqThreshold(self.local_lq_min));
        }
        Ok(())
    }
}
