//! Ranking seam for report builders.

use std::cmp::Ordering;

/// Selectors sort a candidate list and optionally truncate it.
///
/// The default `sort` orders by `score` descending with an explicit total
/// ordering: NaN scores sink to the end so that missing or degenerate data
/// can never surface at the top of a report. Implementations with composite
/// sort keys override `sort` and keep `score` as the primary key.
pub trait Selector<C> {
    /// Sort and truncate based on the provided configuration.
    fn select(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Extract the primary ranking score from a candidate.
    fn score(&self, candidate: &C) -> f64;

    /// Sort candidates by their scores in descending order.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
            }
        });
        sorted
    }

    /// Maximum number of candidates to keep; `None` means no truncation.
    fn size(&self) -> Option<usize> {
        None
    }
}
