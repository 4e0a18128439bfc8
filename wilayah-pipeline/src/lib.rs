//! Transaction ledger pipeline.
//!
//! Data flow: raw CSV rows -> `ledger` (parse) -> `aggregator` (per-item
//! per-region unique counts + dataset baseline) -> `wilayah_metrics` scoring
//! -> `classifier` (ordered rule set) -> `report`/`render` emitters, with
//! `ranking` producing the per-region best-seller lists from the same
//! aggregation. The whole pipeline is a synchronous single pass; each stage
//! consumes an immutable input and produces a new structure.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod ledger;
pub mod ranking;
pub mod region;
pub mod render;
pub mod report;
pub mod selector;

pub use aggregator::{aggregate, Aggregation, ItemProfile};
pub use classifier::{classify_profiles, ClassifiedItem, Classifier, Label};
pub use error::{PipelineError, PipelineResult};
pub use ledger::{load_ledger, load_ledger_file, LedgerRecord, LoadSummary};
pub use region::Region;
