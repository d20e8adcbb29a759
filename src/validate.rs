//! Validation pipeline entry point.
//!
//! Sequence per call: argument validation (parser + prefix lookup, errors
//! collected independently), filtered cache read, remote verification on a
//! miss, cache write for confirmed-valid results. Argument failures reject
//! the request before any I/O.

use std::sync::Arc;

use crate::cache::{RESULT_TTL, TtlStore, filter_cached, result_key};
use crate::client::{DEFAULT_CONTRACT_URL, HttpTransport, RegistryTransport, VerificationClient};
use crate::error::{ArgumentError, RequestRejected, TransportError};
use crate::parse::canonicalize;
use crate::prefix::PrefixTable;
use crate::result::ValidationResult;

/// Pipeline configuration, passed explicitly — nothing is read from
/// ambient process state.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Development switch: treat every cache read as a miss, skip cache
    /// writes, and re-fetch the service description on every call.
    pub debug: bool,
    /// Where the registry publishes its service description.
    pub contract_url: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            contract_url: DEFAULT_CONTRACT_URL.to_string(),
        }
    }
}

/// Public entry point for VAT number validation.
pub struct VatValidator {
    table: PrefixTable,
    store: Arc<dyn TtlStore>,
    client: VerificationClient,
    debug: bool,
}

impl VatValidator {
    /// A validator over the given cache backend with the production HTTP
    /// transport and the base prefix table.
    pub fn new(store: Arc<dyn TtlStore>, config: ValidatorConfig) -> Result<Self, TransportError> {
        let transport: Arc<dyn RegistryTransport> = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(
            transport,
            store,
            PrefixTable::new(),
            config,
        ))
    }

    /// A validator with a caller-supplied transport and prefix table.
    pub fn with_transport(
        transport: Arc<dyn RegistryTransport>,
        store: Arc<dyn TtlStore>,
        table: PrefixTable,
        config: ValidatorConfig,
    ) -> Self {
        let client = VerificationClient::new(
            transport,
            Arc::clone(&store),
            config.contract_url,
            config.debug,
        );
        Self {
            table,
            store,
            client,
            debug: config.debug,
        }
    }

    /// Validate `vat_number` for `country_code` against the registry.
    ///
    /// Malformed arguments come back as [`RequestRejected`] without any
    /// cache access or network call. A completed attempt — including an
    /// unreachable registry — comes back as `Ok` with the outcome encoded
    /// in the result.
    pub async fn validate(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<ValidationResult, RequestRejected> {
        let mut errors = Vec::new();

        let number = match canonicalize(vat_number, &self.table) {
            Ok(number) => Some(number),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };
        let prefix = match self.table.resolve(country_code) {
            Some(prefix) => Some(prefix.to_string()),
            None => {
                errors.push(ArgumentError::UnknownCountryPrefix(country_code.to_string()).to_string());
                None
            }
        };
        let (Some(number), Some(prefix)) = (number, prefix) else {
            return Err(RequestRejected { errors });
        };

        let key = result_key(&prefix, &number);
        if !self.debug {
            if let Some(raw) = self.store.get(&key).await {
                if let Some(cached) = filter_cached(&raw) {
                    return Ok(cached);
                }
            }
        }

        let result = self.client.check_vat(&prefix, &number).await;

        if result.is_valid() && !self.debug {
            if let Ok(serialized) = serde_json::to_string(&result) {
                self.store.put(&key, serialized, RESULT_TTL).await;
            }
        }
        Ok(result)
    }
}
