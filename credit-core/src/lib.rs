//! Credit Core — ledger rules for code-based credit redemption.
//!
//! This crate owns every decision with business weight: which codes are
//! valid, how many credits each grants, how often a code may be used by
//! an account, and what the account looks like afterwards. It performs
//! no IO; `credit-app-core` supplies snapshots and persists results.
//!
//! # Module Map
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`constants`] | Caps and production codes |
//! | [`errors`] | `CreditError` and the error code registry |
//! | [`tiers`] | Code ↔ tier table |
//! | [`ledger_policy`] | Snapshot types and `evaluate_redemption` |

/// Redemption caps and the production tier codes.
pub mod constants;

/// Error types for credit-core operations.
pub mod errors;

/// Code-to-tier mapping.
pub mod tiers;

/// Pure redemption policy.
pub mod ledger_policy;

pub use errors::CreditError;
pub use ledger_policy::{
    evaluate_redemption, reset_account, Credits, RedemptionAttempt, RedemptionOutcome, Rejection,
    Role, UserAccount,
};
pub use tiers::TierTable;
