//! Stable result contract returned by every lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued validity of a VAT number.
///
/// `Unknown` means the check could not be completed (unreachable registry,
/// unusable reply) — it is not a negative answer. The registry's wire
/// representation (`"true"` / `"false"` literals) is normalized into this
/// enum at the transport boundary and never propagates further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// The registry confirmed the number.
    Valid,
    /// The registry answered and the number is not registered.
    Invalid,
    /// No usable answer was obtained.
    Unknown,
}

impl Validity {
    /// Whether this is a confirmed-valid answer.
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
        })
    }
}

/// Outcome of a completed validation attempt.
///
/// Serializable because confirmed-valid results are stored in the cache
/// and read back on later calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Tri-state answer; see [`Validity`].
    pub validity: Validity,
    /// Registered company name, empty when the registry withheld it.
    pub company_name: String,
    /// Registered company address, empty when the registry withheld it.
    pub company_address: String,
    /// Ordered error messages accumulated during the attempt.
    pub errors: Vec<String>,
    /// Raw registry reply for diagnostics. Absent when no reply arrived.
    pub raw_response: Option<String>,
}

impl ValidationResult {
    /// Whether the registry confirmed the number.
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// An inconclusive result carrying the given messages.
    pub(crate) fn unknown(errors: Vec<String>) -> Self {
        Self {
            validity: Validity::Unknown,
            company_name: String::new(),
            company_address: String::new(),
            errors,
            raw_response: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_display() {
        assert_eq!(Validity::Valid.to_string(), "valid");
        assert_eq!(Validity::Invalid.to_string(), "invalid");
        assert_eq!(Validity::Unknown.to_string(), "unknown");
    }

    #[test]
    fn unknown_is_not_valid() {
        let r = ValidationResult::unknown(vec!["no reply".into()]);
        assert!(!r.is_valid());
        assert_eq!(r.errors, vec!["no reply".to_string()]);
        assert!(r.raw_response.is_none());
    }

    #[test]
    fn result_serde_round_trip() {
        let r = ValidationResult {
            validity: Validity::Valid,
            company_name: "ACME GMBH".into(),
            company_address: "MUSTERSTR 1\n10115 BERLIN".into(),
            errors: vec![],
            raw_response: Some("<xml/>".into()),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"validity\":\"valid\""));
        let back: ValidationResult = serde_json::from_str(&json).unwrap();
        assert!(back.is_valid());
        assert_eq!(back.company_name, "ACME GMBH");
    }
}
