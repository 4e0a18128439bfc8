//! The closed set of DKI Jakarta wilayah and the free-text resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A DKI Jakarta administrative region. Static reference data; the set never
/// grows at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    JakartaPusat,
    JakartaTimur,
    JakartaBarat,
    JakartaSelatan,
    JakartaUtara,
    KepulauanSeribu,
}

/// Ordered match patterns: (whitespace-stripped uppercase needle, region).
/// `KEPSERIBU` covers the abbreviated form seen in store addresses.
const PATTERNS: [(&str, Region); 7] = [
    ("JAKARTAPUSAT", Region::JakartaPusat),
    ("JAKARTATIMUR", Region::JakartaTimur),
    ("JAKARTABARAT", Region::JakartaBarat),
    ("JAKARTASELATAN", Region::JakartaSelatan),
    ("JAKARTAUTARA", Region::JakartaUtara),
    ("KEPULAUANSERIBU", Region::KepulauanSeribu),
    ("KEPSERIBU", Region::KepulauanSeribu),
];

impl Region {
    pub const COUNT: usize = 6;

    /// Canonical order, used for report columns and iteration.
    pub const ALL: [Region; Region::COUNT] = [
        Region::JakartaPusat,
        Region::JakartaTimur,
        Region::JakartaBarat,
        Region::JakartaSelatan,
        Region::JakartaUtara,
        Region::KepulauanSeribu,
    ];

    /// Resolve a free-text store address to a region.
    ///
    /// Matching is case-insensitive and ignores all whitespace, so
    /// "JAKARTA  PUSAT", "jakarta pusat" and "JakartaPusat" all resolve.
    /// Empty or unrecognized input yields `None` ("unknown"); this never
    /// fails on malformed text.
    pub fn resolve(location: &str) -> Option<Region> {
        if location.is_empty() {
            return None;
        }
        let compact: String = location
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        PATTERNS
            .iter()
            .find(|(needle, _)| compact.contains(needle))
            .map(|&(_, region)| region)
    }

    /// Position in `ALL`, used to index count slices.
    pub fn index(self) -> usize {
        Region::ALL.iter().position(|&r| r == self).unwrap_or(0)
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Region::JakartaPusat => "Jakarta Pusat",
            Region::JakartaTimur => "Jakarta Timur",
            Region::JakartaBarat => "Jakarta Barat",
            Region::JakartaSelatan => "Jakarta Selatan",
            Region::JakartaUtara => "Jakarta Utara",
            Region::KepulauanSeribu => "Kepulauan Seribu",
        }
    }

}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown region name: '{}'", s))
    }
}
