//! Error types for credit-core.
//!
//! Two classes share one enum: policy-level rejections (`InvalidCode`,
//! `CodeExhausted`) are recovered locally and shown to the user;
//! boundary-level failures (`LookupFailed`, `PersistFailed`) are
//! reported to the caller, which owns any retry decision.
//!
//! ## Stability
//! Machine codes in [`ERROR_CODES`] and the display strings are part of
//! the surface consumed by the presentation layer. Changing them is a
//! breaking change.

/// Unified error type for credit ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreditError {
    /// Code is not present in the tier table.
    #[error("Invalid code: the scanned code is not valid")]
    InvalidCode,

    /// Code already redeemed as many times as the account's role allows.
    #[error("Code exhausted: cannot use this code more than {cap} time(s) (used {used})")]
    CodeExhausted { cap: u32, used: u32 },

    /// Session could not be resolved to an account record.
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Balance/history write did not durably succeed.
    #[error("Persist failed: {0}")]
    PersistFailed(String),
}

impl CreditError {
    /// Stable machine code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CreditError::InvalidCode => "INVALID_CODE",
            CreditError::CodeExhausted { .. } => "CODE_EXHAUSTED",
            CreditError::LookupFailed(_) => "LOOKUP_FAILED",
            CreditError::PersistFailed(_) => "PERSIST_FAILED",
        }
    }

    /// `true` for rejections decided by the ledger policy.
    pub fn is_policy_level(&self) -> bool {
        matches!(
            self,
            CreditError::InvalidCode | CreditError::CodeExhausted { .. }
        )
    }
}

// ── Error Code Registry ─────────────────────────────────────────────

/// Canonical error code registry — 2 POLICY + 2 BOUNDARY codes.
pub const ERROR_CODES: [&str; 4] = [
    // POLICY class
    "INVALID_CODE",
    "CODE_EXHAUSTED",
    // BOUNDARY class
    "LOOKUP_FAILED",
    "PERSIST_FAILED",
];
