//! # vatguard
//!
//! EU VAT number validation against the VIES registry: identifier
//! normalization, country-to-prefix resolution, TTL-cached lookups, and a
//! stable tri-state result contract over the registry's SOAP service.
//!
//! The registry is rate-sensitive and frequently unreliable, so confirmed
//! valid results are cached for an hour and every remote failure mode is
//! normalized into the result rather than raised — a call either gets a
//! [`ValidationResult`] or a local [`RequestRejected`] for malformed
//! arguments, never a panic or an exception from the wire.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vatguard::{MemoryStore, ValidatorConfig, VatValidator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = VatValidator::new(Arc::new(MemoryStore::new()), ValidatorConfig::default())?;
//!
//! match validator.validate("DE", "123 456 789").await {
//!     Ok(result) => println!("{}: {}", result.validity, result.company_name),
//!     Err(rejected) => eprintln!("{rejected}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Any TTL-capable key/value store can back the cache by implementing
//! [`TtlStore`]; the bundled [`MemoryStore`] covers single-process use.

pub mod cache;
pub mod client;
pub mod error;
pub mod parse;
pub mod prefix;
pub mod result;
pub mod validate;

pub use cache::{CONTRACT_KEY, CONTRACT_TTL, MemoryStore, RESULT_TTL, TtlStore, result_key};
pub use client::{DEFAULT_CONTRACT_URL, HttpTransport, RegistryTransport, VerificationClient};
pub use error::{ArgumentError, RequestRejected, TransportError};
pub use parse::canonicalize;
pub use prefix::PrefixTable;
pub use result::{ValidationResult, Validity};
pub use validate::{ValidatorConfig, VatValidator};
