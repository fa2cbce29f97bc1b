//! Conformance: the production tier table.

use credit_core::constants::{CODE_TIER_10, CODE_TIER_100, CODE_TIER_50, DEFAULT_TIERS};
use credit_core::TierTable;

#[test]
fn conformance_default_table_matches_constants() {
    let table = TierTable::default();
    assert_eq!(table.len(), DEFAULT_TIERS.len());
    for (code, credits) in DEFAULT_TIERS {
        assert_eq!(table.tier_for(code), Some(credits));
        assert_eq!(table.code_for(credits), Some(code));
    }
}

#[test]
fn conformance_default_codes_exact() {
    assert_eq!(CODE_TIER_10, "8c95def646b6127282ed50454b73240300dccabc");
    assert_eq!(CODE_TIER_50, "ae338e4e0cbb4e4bcffaf9ce5b409feb8edd5172");
    assert_eq!(CODE_TIER_100, "2786f4877b9091dcad7f35751bfcf5d5ea712b2f");
}

#[test]
fn conformance_default_table_equals_rebuilt_table() {
    let rebuilt = TierTable::new(DEFAULT_TIERS).unwrap();
    assert_eq!(rebuilt, TierTable::default());
}
