use thiserror::Error;

/// Why an argument was rejected before any I/O was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArgumentError {
    /// The VAT number reduced to nothing after normalization.
    #[error("invalid VAT number '{0}': empty after removing formatting")]
    InvalidNumberFormat(String),

    /// No registry prefix is known for the country code.
    #[error("no registry prefix for country code '{0}'")]
    UnknownCountryPrefix(String),
}

/// Rejection returned by the validator when argument validation fails.
///
/// Distinct from a completed-but-negative result: malformed input never
/// reaches the registry and is reported with human-readable messages
/// instead of a falsified negative identity check.
#[derive(Debug, Clone, Error)]
#[error("request rejected: {}", .errors.join("; "))]
pub struct RequestRejected {
    /// Ordered messages, one per failed argument.
    pub errors: Vec<String>,
}

/// Network-level failure talking to the registry.
///
/// Internal to the verification client: it collapses into an `Unknown`
/// result rather than propagating to callers.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, TLS, or timeout error.
    #[error("registry network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the registry.
    #[error("registry returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}
