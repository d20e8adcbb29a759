use std::sync::Arc;
use vatguard::{MemoryStore, PrefixTable, ValidatorConfig, VatValidator, canonicalize};

#[tokio::main]
async fn main() {
    // Normalization and prefix resolution (no network required)
    println!("=== Identifier Normalization ===\n");

    let table = PrefixTable::new();
    let test_numbers = [
        "DE 123 456 789",
        "el-123456789",
        "FR12.345.678.901",
        "123456789",
        " -._ ", // nothing left after normalization
    ];

    for raw in &test_numbers {
        match canonicalize(raw, &table) {
            Ok(canonical) => println!("  {raw:?} => {canonical}"),
            Err(e) => println!("  {raw:?} => REJECTED: {e}"),
        }
    }

    println!("\n=== Prefix Resolution ===\n");

    for code in ["DE", "GR", "IM", "MC", "XI", "US"] {
        match table.resolve(code) {
            Some(prefix) => println!("  {code} => {prefix}"),
            None => println!("  {code} => not served by the registry"),
        }
    }

    // Full pipeline against the live registry (requires network)
    println!("\n=== Registry Lookup ===\n");

    let store = Arc::new(MemoryStore::new());
    let validator = match VatValidator::new(store, ValidatorConfig::default()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("  could not build HTTP transport: {e}");
            return;
        }
    };

    for (country, number) in [("DE", "123456789"), ("ZZ", "123456")] {
        match validator.validate(country, number).await {
            Ok(result) => {
                println!("  {country} {number}:");
                println!("    validity = {}", result.validity);
                println!("    name     = {:?}", result.company_name);
                println!("    address  = {:?}", result.company_address);
                for err in &result.errors {
                    println!("    error    = {err}");
                }
            }
            Err(rejected) => println!("  {country} {number}: {rejected}"),
        }
    }
}
