//! Conformance: error code registry.

use credit_core::errors::{CreditError, ERROR_CODES};

/// Exact list and order.
#[test]
fn conformance_error_registry_exact_list() {
    let expected: [&str; 4] = [
        // POLICY class
        "INVALID_CODE",
        "CODE_EXHAUSTED",
        // BOUNDARY class
        "LOOKUP_FAILED",
        "PERSIST_FAILED",
    ];
    assert_eq!(ERROR_CODES, expected, "ERROR_CODES drift detected");
}

/// All codes must be unique.
#[test]
fn conformance_error_registry_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in &ERROR_CODES {
        assert!(seen.insert(code), "duplicate error code: {code}");
    }
}

/// Every `CreditError` variant reports a registered code, in registry order.
#[test]
fn conformance_error_variants_cover_registry() {
    let codes: Vec<&str> = [
        CreditError::InvalidCode,
        CreditError::CodeExhausted { cap: 1, used: 1 },
        CreditError::LookupFailed("x".into()),
        CreditError::PersistFailed("x".into()),
    ]
    .iter()
    .map(CreditError::code)
    .collect();
    assert_eq!(codes, ERROR_CODES);
}

/// Codes are upper snake case.
#[test]
fn conformance_error_codes_upper_snake_case() {
    for code in &ERROR_CODES {
        assert!(
            code.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "malformed error code: {code}"
        );
    }
}
