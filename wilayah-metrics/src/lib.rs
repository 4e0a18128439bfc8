//! Statistical core for regional distribution analysis.
//!
//! This crate is deliberately free of I/O and domain knowledge: it works on
//! region-indexed count slices and knows nothing about where the counts came
//! from. The pipeline crate maps its region identifiers onto indices before
//! calling in, and maps the results back afterwards.

pub mod baseline;
pub mod distribution;
pub mod entropy;
pub mod thresholds;

pub use baseline::RegionBaseline;
pub use distribution::{score, DistributionMetrics};
pub use thresholds::{ClassifierConfig, ConfigError};
