//! SOAP client for the registry's checkVat service.
//!
//! The registry publishes a WSDL at a fixed URL; the client caches that
//! document briefly, binds to the endpoint address it declares, and issues
//! the single `checkVat` operation. Every failure mode is folded into the
//! returned [`ValidationResult`] — this module never surfaces an error to
//! the orchestrator.

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CONTRACT_KEY, CONTRACT_TTL, TtlStore};
use crate::error::TransportError;
use crate::result::{ValidationResult, Validity};

/// Published WSDL for the VIES checkVat service.
pub const DEFAULT_CONTRACT_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/checkVatService.wsdl";

/// Connect timeout for contract fetches and lookup calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const CHECK_VAT_NS: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat:types";

/// Wire access to the registry, split from response handling so tests can
/// script replies without a network.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Fetch the service-description document from its well-known URL.
    async fn fetch_contract(&self, url: &str) -> Result<String, TransportError>;

    /// POST a checkVat envelope to `endpoint`, returning the raw reply.
    async fn call(&self, endpoint: &str, envelope: &str) -> Result<String, TransportError>;
}

/// Production transport over reqwest with rustls.
///
/// Requests and responses are UTF-8 throughout; identifiers and company
/// names routinely contain non-ASCII characters.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, TransportError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn fetch_contract(&self, url: &str) -> Result<String, TransportError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::read_body(resp).await
    }

    async fn call(&self, endpoint: &str, envelope: &str) -> Result<String, TransportError> {
        let resp = self
            .client
            .post(endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "")
            .body(envelope.to_string())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::read_body(resp).await
    }
}

/// Remote verification client: contract caching, endpoint binding, and
/// response normalization for the `checkVat` operation.
pub struct VerificationClient {
    transport: Arc<dyn RegistryTransport>,
    store: Arc<dyn TtlStore>,
    contract_url: String,
    debug: bool,
}

impl VerificationClient {
    pub fn new(
        transport: Arc<dyn RegistryTransport>,
        store: Arc<dyn TtlStore>,
        contract_url: String,
        debug: bool,
    ) -> Self {
        Self {
            transport,
            store,
            contract_url,
            debug,
        }
    }

    /// Check a (prefix, canonical number) pair against the registry.
    ///
    /// Never fails as an error: an unreachable registry, a malformed
    /// contract document, or an unusable reply all come back as a result
    /// with [`Validity::Unknown`].
    pub async fn check_vat(&self, prefix: &str, number: &str) -> ValidationResult {
        let contract = match self.contract().await {
            Ok(doc) => doc,
            Err(e) => {
                return ValidationResult::unknown(vec![format!(
                    "could not initialize registry client: {e}"
                )]);
            }
        };

        let Some(endpoint) = endpoint_from_contract(&contract) else {
            return ValidationResult::unknown(vec![
                "could not initialize registry client: no endpoint address in service description"
                    .to_string(),
            ]);
        };

        let envelope = check_vat_envelope(prefix, number);
        match self.transport.call(&endpoint, &envelope).await {
            Ok(body) => parse_check_vat_reply(&body),
            Err(e) => ValidationResult::unknown(vec![e.to_string()]),
        }
    }

    /// The service-description document, from its 60-second cache when
    /// live. Debug mode forces a fresh fetch; the fetched document is
    /// re-cached either way.
    async fn contract(&self) -> Result<String, TransportError> {
        if !self.debug {
            if let Some(doc) = self.store.get(CONTRACT_KEY).await {
                return Ok(doc);
            }
        }
        let doc = self.transport.fetch_contract(&self.contract_url).await?;
        self.store
            .put(CONTRACT_KEY, doc.clone(), CONTRACT_TTL)
            .await;
        Ok(doc)
    }
}

/// Extract the SOAP endpoint address from the service description.
/// `None` means the document is unusable and the client cannot be bound.
fn endpoint_from_contract(wsdl: &str) -> Option<String> {
    let mut reader = Reader::from_str(wsdl);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"address" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"location" {
                        return attr.unescape_value().ok().map(|v| v.into_owned());
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Serialize the single checkVat request operation.
fn check_vat_envelope(prefix: &str, number: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="{soap}" xmlns:vies="{vies}">"#,
            "<soapenv:Body><vies:checkVat>",
            "<vies:countryCode>{cc}</vies:countryCode>",
            "<vies:vatNumber>{vat}</vies:vatNumber>",
            "</vies:checkVat></soapenv:Body></soapenv:Envelope>"
        ),
        soap = SOAP_ENVELOPE_NS,
        vies = CHECK_VAT_NS,
        cc = quick_xml::escape::escape(prefix),
        vat = quick_xml::escape::escape(number),
    )
}

/// Fields of the reply we care about, addressed by local element name.
enum ReplyField {
    Valid,
    Name,
    Address,
    Fault,
}

/// Normalize the registry's reply into the stable result shape.
///
/// The wire `valid` field is the literal string `"true"` or `"false"`; it
/// is mapped to the tri-state here and never escapes this module. A SOAP
/// fault (no `valid` element, a `faultstring` instead) maps to `Invalid`
/// with the fault text recorded; anything else yields `Unknown`.
///
/// The wire contract reserves a fault slot in every reply. An absent or
/// empty one is dropped rather than recorded, so a completed success
/// reports an empty `errors` list instead of a single `""` entry.
fn parse_check_vat_reply(xml: &str) -> ValidationResult {
    let mut valid: Option<String> = None;
    let mut name = String::new();
    let mut address = String::new();
    let mut fault: Option<String> = None;

    let mut reader = Reader::from_str(xml);
    let mut current: Option<ReplyField> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                current = match e.local_name().as_ref() {
                    b"valid" => Some(ReplyField::Valid),
                    b"name" => Some(ReplyField::Name),
                    b"address" => Some(ReplyField::Address),
                    b"faultstring" | b"faultString" => Some(ReplyField::Fault),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                if let (Some(field), Ok(text)) = (&current, t.unescape()) {
                    match field {
                        ReplyField::Valid => valid = Some(text.trim().to_string()),
                        ReplyField::Name => name.push_str(&text),
                        ReplyField::Address => address.push_str(&text),
                        ReplyField::Fault => fault = Some(text.trim().to_string()),
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(_) => return ValidationResult::unknown(Vec::new()),
            _ => {}
        }
    }

    // The registry sends "---" when it withholds name or address
    let filter_placeholder = |s: String| if s == "---" { String::new() } else { s };

    if let Some(valid) = valid {
        return ValidationResult {
            validity: if valid == "true" {
                Validity::Valid
            } else {
                Validity::Invalid
            },
            company_name: filter_placeholder(name),
            company_address: filter_placeholder(address),
            errors: fault.into_iter().collect(),
            raw_response: Some(xml.to_string()),
        };
    }
    if let Some(fault) = fault {
        return ValidationResult {
            validity: Validity::Invalid,
            company_name: String::new(),
            company_address: String::new(),
            errors: vec![fault],
            raw_response: Some(xml.to_string()),
        };
    }
    ValidationResult::unknown(Vec::new())
}
