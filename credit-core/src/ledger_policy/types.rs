//! Ledger policy types — account snapshot, attempt, outcome.
//!
//! A `UserAccount` is an immutable snapshot. The policy never mutates
//! it; accepted redemptions return an [`AccountUpdate`] that the caller
//! applies to obtain the replacement snapshot.

use crate::constants::{ADMIN_PROFILE, ADMIN_REDEMPTION_CAP, STANDARD_REDEMPTION_CAP};
use crate::errors::CreditError;

/// Credit amount. Balances and tiers share this unit.
pub type Credits = u64;

/// Account role. Governs the per-code redemption cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Role {
    #[default]
    Standard,
    Admin,
}

impl Role {
    /// Map the stored profile string. Anything other than `"admin"` is
    /// a standard account.
    pub fn from_profile(profile: &str) -> Self {
        if profile == ADMIN_PROFILE {
            Role::Admin
        } else {
            Role::Standard
        }
    }

    pub fn redemption_cap(self) -> u32 {
        match self {
            Role::Standard => STANDARD_REDEMPTION_CAP,
            Role::Admin => ADMIN_REDEMPTION_CAP,
        }
    }
}

/// Snapshot of one account as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserAccount {
    /// Opaque account id (store document id).
    pub id: String,
    /// Credits currently available.
    pub balance: Credits,
    pub role: Role,
    /// Accepted codes in redemption order. Duplicates are expected.
    pub redeemed_codes: Vec<String>,
}

impl UserAccount {
    /// Fresh account with zero balance and empty history.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            balance: 0,
            role,
            redeemed_codes: Vec::new(),
        }
    }

    /// Replacement snapshot with `update` applied.
    pub fn apply(&self, update: AccountUpdate) -> Self {
        Self {
            id: self.id.clone(),
            balance: update.balance,
            role: self.role,
            redeemed_codes: update.redeemed_codes,
        }
    }
}

/// One scan or selection event, resolved against the tier table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionAttempt {
    pub code: String,
    pub amount: Credits,
}

/// New values for the two mutable account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    pub balance: Credits,
    pub redeemed_codes: Vec<String>,
}

/// Why a redemption was refused. Account state is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Code not in the tier table.
    InvalidCode,
    /// Code already used `used` times against a cap of `cap`.
    CodeExhausted { cap: u32, used: u32 },
}

impl From<Rejection> for CreditError {
    fn from(r: Rejection) -> Self {
        match r {
            Rejection::InvalidCode => CreditError::InvalidCode,
            Rejection::CodeExhausted { cap, used } => CreditError::CodeExhausted { cap, used },
        }
    }
}

/// Output of [`evaluate_redemption`](super::evaluate_redemption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Accepted(AccountUpdate),
    Rejected(Rejection),
}

impl RedemptionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RedemptionOutcome::Accepted(_))
    }

    /// Collapse into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<AccountUpdate, CreditError> {
        match self {
            RedemptionOutcome::Accepted(update) => Ok(update),
            RedemptionOutcome::Rejected(r) => Err(r.into()),
        }
    }
}
