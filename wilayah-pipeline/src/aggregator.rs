//! Single-pass transaction aggregation.
//!
//! Consumes the parsed ledger and produces one `ItemProfile` per distinct
//! item code, plus the dataset-wide `RegionBaseline` needed for Location
//! Quotient scoring. Transaction counting is by distinct transaction id per
//! (item, region): the same order id appearing on several line items of one
//! item counts once, while two different items sharing an order id each
//! count it for themselves.

use std::collections::{HashMap, HashSet};

use wilayah_metrics::RegionBaseline;

use crate::ledger::LedgerRecord;
use crate::region::Region;

/// Aggregated activity for one distinct item code.
///
/// All per-region slices are indexed by `Region::index()`.
#[derive(Clone, Debug)]
pub struct ItemProfile {
    pub code: String,
    pub description: String,
    /// Distinct transaction ids touching this item, per region.
    pub counts_by_region: [u64; Region::COUNT],
    pub qty_by_region: [f64; Region::COUNT],
    pub value_by_region: [f64; Region::COUNT],
    /// Sum of `counts_by_region`.
    pub total_transactions: u64,
    /// First observed unit price, 0.0 if the item never carried one.
    pub first_price: f64,
}

impl ItemProfile {
    pub fn qty_total(&self) -> f64 {
        self.qty_by_region.iter().sum()
    }

    pub fn value_total(&self) -> f64 {
        self.value_by_region.iter().sum()
    }
}

/// Row accounting for the aggregation stage.
#[derive(Clone, Debug, Default)]
pub struct AggregateSummary {
    /// Rows that contributed to a profile.
    pub rows_consumed: usize,
    /// Return rows dropped because `include_retur` was off.
    pub retur_excluded: usize,
    /// Rows whose location resolved to no known region.
    pub unknown_region: usize,
}

/// Output of a full aggregation pass.
pub struct Aggregation {
    /// One profile per distinct item code, sorted by code.
    pub profiles: Vec<ItemProfile>,
    /// Per-region share of all unique transactions, for LQ scoring.
    pub baseline: RegionBaseline,
    /// Distinct transaction ids per region across all items.
    pub region_totals: [u64; Region::COUNT],
    /// Distinct transaction ids across the whole dataset.
    pub grand_total: u64,
    pub summary: AggregateSummary,
}

/// Transient per-item accumulator; the id sets exist only until counts are
/// materialized.
struct ItemAccumulator {
    description: String,
    transaction_ids: [HashSet<String>; Region::COUNT],
    qty_by_region: [f64; Region::COUNT],
    value_by_region: [f64; Region::COUNT],
    first_price: Option<f64>,
}

impl ItemAccumulator {
    fn new() -> Self {
        Self {
            description: String::new(),
            transaction_ids: std::array::from_fn(|_| HashSet::new()),
            qty_by_region: [0.0; Region::COUNT],
            value_by_region: [0.0; Region::COUNT],
            first_price: None,
        }
    }
}

/// Run the full aggregation pass.
///
/// Return rows are dropped unless `include_retur` is set; rows with an
/// unresolvable region are excluded from both the profiles and the baseline
/// but reported in the summary.
pub fn aggregate(records: &[LedgerRecord], include_retur: bool) -> Aggregation {
    let mut items: HashMap<String, ItemAccumulator> = HashMap::new();
    let mut region_ids: [HashSet<&str>; Region::COUNT] = std::array::from_fn(|_| HashSet::new());
    let mut all_ids: HashSet<&str> = HashSet::new();
    let mut summary = AggregateSummary::default();

    for record in records {
        if record.is_retur && !include_retur {
            summary.retur_excluded += 1;
            continue;
        }
        let Some(region) = Region::resolve(&record.location) else {
            summary.unknown_region += 1;
            continue;
        };
        let idx = region.index();

        let acc = items
            .entry(record.item_code.clone())
            .or_insert_with(ItemAccumulator::new);
        acc.transaction_ids[idx].insert(record.transaction_id.clone());
        acc.qty_by_region[idx] += record.quantity;
        acc.value_by_region[idx] += record.line_value;
        if acc.first_price.is_none() {
            acc.first_price = Some(record.unit_price);
        }
        if acc.description.is_empty() && !record.description.is_empty() {
            acc.description = record.description.clone();
        }

        region_ids[idx].insert(&record.transaction_id);
        all_ids.insert(&record.transaction_id);
        summary.rows_consumed += 1;
    }

    let region_totals: [u64; Region::COUNT] =
        std::array::from_fn(|i| region_ids[i].len() as u64);
    let grand_total = all_ids.len() as u64;
    let baseline = RegionBaseline::from_totals(&region_totals, grand_total);

    let mut profiles: Vec<ItemProfile> = items
        .into_iter()
        .map(|(code, acc)| {
            let counts_by_region: [u64; Region::COUNT] =
                std::array::from_fn(|i| acc.transaction_ids[i].len() as u64);
            ItemProfile {
                code,
                description: acc.description,
                counts_by_region,
                qty_by_region: acc.qty_by_region,
                value_by_region: acc.value_by_region,
                total_transactions: counts_by_region.iter().sum(),
                first_price: acc.first_price.unwrap_or(0.0),
            }
        })
        .collect();
    profiles.sort_by(|a, b| a.code.cmp(&b.code));

    Aggregation {
        profiles,
        baseline,
        region_totals,
        grand_total,
        summary,
    }
}
