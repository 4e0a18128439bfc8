//! Distribution-pattern labeling.
//!
//! Labels every item as Global, Regional, Local, or Low-Volume from its
//! scored distribution metrics. The rule set is an ordered decision table:
//! rules are evaluated top-down and the first match wins, which makes the
//! precedence explicit and each predicate independently testable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wilayah_metrics::distribution::{score, DistributionMetrics};
use wilayah_metrics::{ClassifierConfig, ConfigError, RegionBaseline};

use crate::aggregator::ItemProfile;
use crate::region::Region;

/// Distribution-pattern category. Every item gets exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Global,
    Regional,
    Local,
    LowVolume,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Global => write!(f, "Global"),
            Label::Regional => write!(f, "Regional"),
            Label::Local => write!(f, "Local"),
            Label::LowVolume => write!(f, "Low-Volume"),
        }
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Global" => Ok(Label::Global),
            "Regional" => Ok(Label::Regional),
            "Local" => Ok(Label::Local),
            "Low-Volume" => Ok(Label::LowVolume),
            other => Err(format!("unknown label: '{}'", other)),
        }
    }
}

/// Rule-based labeler over scored distribution metrics.
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Build a classifier, rejecting invalid threshold configurations
    /// before any item is processed.
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Assign a label. Total and deterministic: the same metrics always
    /// produce the same label, and the trailing Regional arm makes the rule
    /// set exhaustive.
    pub fn classify(&self, metrics: &DistributionMetrics) -> Label {
        let rules = [
            (Label::LowVolume, self.is_low_volume(metrics)),
            (Label::Global, self.is_global(metrics)),
            (Label::Local, self.is_local(metrics)),
        ];
        for (label, matched) in rules {
            if matched {
                return label;
            }
        }
        Label::Regional
    }

    /// Rule 1: too few transactions to say anything. Checked first so that
    /// zero-total items never reach the spread rules.
    fn is_low_volume(&self, m: &DistributionMetrics) -> bool {
        m.total < self.config.n_min
    }

    /// Rule 2: widely and evenly spread, no single region dominates.
    /// Boundaries are inclusive: h_norm exactly at the minimum counts.
    fn is_global(&self, m: &DistributionMetrics) -> bool {
        m.presence_count >= self.config.global_presence_min
            && m.h_norm >= self.config.global_h_norm_min
            && m.max_share <= self.config.global_max_share_max
    }

    /// Rule 3: single-region, or concentrated by all three signals at once
    /// (dominant share, low entropy, high peak LQ).
    fn is_local(&self, m: &DistributionMetrics) -> bool {
        m.presence_count == 1
            || (m.max_share >= self.config.local_max_share_min
                && m.h_norm <= self.config.local_h_norm_max
                && m.lq_max >= self.config.local_lq_min)
    }
}

/// One fully processed item: profile, metrics, dominant regions, label.
#[derive(Clone, Debug)]
pub struct ClassifiedItem {
    pub profile: ItemProfile,
    pub metrics: DistributionMetrics,
    /// Regions attaining the maximum share, in canonical order.
    pub dominant_regions: Vec<Region>,
    pub label: Label,
}

/// Score and label every profile against the dataset baseline.
///
/// Output is sorted by total transaction count descending (item code breaks
/// ties) to match the report ordering.
pub fn classify_profiles(
    profiles: Vec<ItemProfile>,
    baseline: &RegionBaseline,
    classifier: &Classifier,
) -> Vec<ClassifiedItem> {
    let mut classified: Vec<ClassifiedItem> = profiles
        .into_iter()
        .map(|profile| {
            let metrics = score(&profile.counts_by_region, baseline);
            let dominant_regions = metrics
                .dominant_regions
                .iter()
                .map(|&i| Region::ALL[i])
                .collect();
            let label = classifier.classify(&metrics);
            ClassifiedItem {
                profile,
                metrics,
                dominant_regions,
                label,
            }
        })
        .collect();

    classified.sort_by(|a, b| {
        b.metrics
            .total
            .cmp(&a.metrics.total)
            .then_with(|| a.profile.code.cmp(&b.profile.code))
    });
    classified
}
