//! Credit ledger policy — pure redemption decisions.
//!
//! Given an account snapshot and a redemption attempt, decide whether
//! to credit the account and what the new balance and history are.
//! Persistence lives elsewhere; this module only computes.

pub mod policy;
pub mod types;

// Re-export the canonical entrypoints and core types.
pub use policy::{
    attempt_from_code, attempt_from_tier, evaluate_redemption, redemptions_of, reset_account,
};
pub use types::{
    AccountUpdate, Credits, RedemptionAttempt, RedemptionOutcome, Rejection, Role, UserAccount,
};
