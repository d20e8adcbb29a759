//! Country-code → registry-prefix resolution.
//!
//! The registry usually expects the ISO 3166-1 alpha-2 country code as the
//! prefix, but not always: Greece registers under its pre-ISO code and two
//! territories file through a neighbouring country's registry.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Country codes eligible for a registry lookup: the EU member states plus
/// the territories the registry serves under a neighbour's prefix.
const ELIGIBLE_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "GR", "HR", "HU",
    "IE", "IM", "IT", "LT", "LU", "LV", "MC", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
    "XI",
];

/// Base table, built once per process. Each eligible code maps to itself,
/// then the known mismatches are corrected.
static BASE_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map: BTreeMap<_, _> = ELIGIBLE_COUNTRIES.iter().map(|&c| (c, c)).collect();
    map.insert("GR", "EL"); // Greece registers under its pre-ISO code
    map.insert("IM", "GB"); // Isle of Man files through the UK registry
    map.insert("MC", "FR"); // Monaco files through the French registry
    map
});

/// Read-only country-code → registry-prefix table.
///
/// The base mapping is fixed; deployments can extend or override it with
/// entries supplied at construction, which win over the built-ins on every
/// read. Resolution is pure — no I/O, no hidden mutation.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    overrides: BTreeMap<String, String>,
}

impl PrefixTable {
    /// The base table with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table extended with caller-supplied entries. Keys and values are
    /// uppercased; an override for an existing code replaces the built-in.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(k, v)| (k.into().to_uppercase(), v.into().to_uppercase()))
                .collect(),
        }
    }

    /// Resolve the registry prefix for an ISO country code, or `None` for
    /// codes the registry does not serve.
    pub fn resolve(&self, country_code: &str) -> Option<&str> {
        let code = country_code.to_uppercase();
        if let Some(prefix) = self.overrides.get(&code) {
            return Some(prefix.as_str());
        }
        BASE_MAP.get(code.as_str()).copied()
    }

    /// All distinct prefix values, deduplicated across countries. The
    /// parser uses these to strip an embedded prefix from raw input.
    ///
    /// Values come from the effective map (base with overrides applied),
    /// so the set contains exactly what [`PrefixTable::resolve`] can
    /// produce — a shadowed built-in value drops out.
    pub fn prefix_values(&self) -> BTreeSet<String> {
        let mut map: BTreeMap<&str, &str> = BASE_MAP.clone();
        for (code, prefix) in &self.overrides {
            map.insert(code.as_str(), prefix.as_str());
        }
        map.into_values().map(str::to_string).collect()
    }
}
