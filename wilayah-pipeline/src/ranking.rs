//! Per-region best-seller ranking.

use crate::aggregator::ItemProfile;
use crate::region::Region;
use crate::selector::Selector;

/// One item's sales footprint inside a single region.
#[derive(Clone, Debug)]
pub struct RegionItemSales {
    pub region: Region,
    pub code: String,
    pub description: String,
    /// Distinct transactions for this item in this region.
    pub transactions: u64,
    pub qty_total: f64,
    pub first_price: f64,
    pub value_total: f64,
}

/// Ranks items within one region by unique transaction count, breaking ties
/// by total quantity, then total value, then item code for determinism.
pub struct TopSalesSelector {
    pub n: usize,
}

impl Selector<RegionItemSales> for TopSalesSelector {
    fn score(&self, candidate: &RegionItemSales) -> f64 {
        candidate.transactions as f64
    }

    fn sort(&self, candidates: Vec<RegionItemSales>) -> Vec<RegionItemSales> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            b.transactions
                .cmp(&a.transactions)
                .then_with(|| {
                    b.qty_total
                        .partial_cmp(&a.qty_total)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| {
                    b.value_total
                        .partial_cmp(&a.value_total)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.code.cmp(&b.code))
        });
        sorted
    }

    fn size(&self) -> Option<usize> {
        Some(self.n)
    }
}

/// The top-N list for one region.
#[derive(Clone, Debug)]
pub struct RegionTopList {
    pub region: Region,
    pub items: Vec<RegionItemSales>,
}

/// Build the top-N best-seller list for every region, in canonical region
/// order. Regions with no activity produce an empty list.
pub fn top_items_per_region(profiles: &[ItemProfile], n: usize) -> Vec<RegionTopList> {
    let selector = TopSalesSelector { n };
    Region::ALL
        .into_iter()
        .map(|region| {
            let idx = region.index();
            let candidates: Vec<RegionItemSales> = profiles
                .iter()
                .filter(|p| p.counts_by_region[idx] > 0)
                .map(|p| RegionItemSales {
                    region,
                    code: p.code.clone(),
                    description: p.description.clone(),
                    transactions: p.counts_by_region[idx],
                    qty_total: p.qty_by_region[idx],
                    first_price: p.first_price,
                    value_total: p.value_by_region[idx],
                })
                .collect();
            RegionTopList {
                region,
                items: selector.select(candidates),
            }
        })
        .collect()
}
