//! Raw-input normalization into the canonical registry identifier.

use crate::error::ArgumentError;
use crate::prefix::PrefixTable;

/// Formatting characters stripped during normalization.
const FORMATTING: &[char] = &[' ', '-', '_', '.'];

/// Normalize a raw VAT number into the canonical form sent to the registry:
/// formatting characters removed, uppercased, and a leading country prefix
/// (matched against the full set of known prefix *values*) stripped. The
/// caller-supplied country code stays authoritative for prefix resolution;
/// an embedded prefix is discarded.
///
/// Fails only when nothing remains after normalization.
///
/// Idempotent for typical inputs. A canonical number whose own first two
/// characters coincide with a known prefix value is truncated again on
/// re-parse; this matches the upstream registry tooling and is kept as-is.
pub fn canonicalize(raw: &str, table: &PrefixTable) -> Result<String, ArgumentError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !FORMATTING.contains(c))
        .collect::<String>()
        .to_uppercase();

    let head: String = cleaned.chars().take(2).collect();
    let cleaned = if table.prefix_values().contains(&head) {
        cleaned.chars().skip(2).collect()
    } else {
        cleaned
    };

    if cleaned.is_empty() {
        return Err(ArgumentError::InvalidNumberFormat(raw.to_string()));
    }
    Ok(cleaned)
}
