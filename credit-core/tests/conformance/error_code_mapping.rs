//! Conformance: policy rejections and boundary failures map onto
//! stable `CreditError` variants, codes and messages.

use credit_core::errors::CreditError;
use credit_core::ledger_policy::{attempt_from_code, evaluate_redemption, Rejection, Role};
use credit_core::{TierTable, UserAccount};

#[test]
fn conformance_credit_error_display_format_stable() {
    let cases: Vec<(CreditError, &str)> = vec![
        (
            CreditError::InvalidCode,
            "Invalid code: the scanned code is not valid",
        ),
        (
            CreditError::CodeExhausted { cap: 2, used: 2 },
            "Code exhausted: cannot use this code more than 2 time(s) (used 2)",
        ),
        (
            CreditError::LookupFailed("store unreachable".into()),
            "Lookup failed: store unreachable",
        ),
        (
            CreditError::PersistFailed("write rejected".into()),
            "Persist failed: write rejected",
        ),
    ];
    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "CreditError display drift");
    }
}

#[test]
fn conformance_credit_error_is_std_error() {
    let err = CreditError::InvalidCode;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn conformance_unknown_code_maps_to_invalid_code() {
    let table = TierTable::default();
    let rejection = attempt_from_code(&table, "ZZZ").unwrap_err();
    let err: CreditError = rejection.into();
    assert_eq!(err.code(), "INVALID_CODE");
    assert!(err.is_policy_level());
}

#[test]
fn conformance_exhausted_carries_cap_and_used() {
    let table = TierTable::new([("A", 10)]).unwrap();
    let mut user = UserAccount::new("u", Role::Admin);
    user.redeemed_codes = vec!["A".into(), "A".into()];
    let attempt = attempt_from_code(&table, "A").unwrap();
    let err = evaluate_redemption(&table, &user, &attempt)
        .into_result()
        .unwrap_err();
    assert_eq!(err, CreditError::CodeExhausted { cap: 2, used: 2 });
    assert_eq!(err.code(), "CODE_EXHAUSTED");
}

#[test]
fn conformance_rejection_variants_round_into_errors() {
    assert_eq!(
        CreditError::from(Rejection::InvalidCode).code(),
        "INVALID_CODE"
    );
    assert_eq!(
        CreditError::from(Rejection::CodeExhausted { cap: 1, used: 1 }).code(),
        "CODE_EXHAUSTED"
    );
}
