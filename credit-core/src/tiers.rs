//! Code-to-tier mapping.
//!
//! The table is immutable once built and is injected into the policy
//! rather than consulted through global state. Both entry points (a
//! scanned code, or a tier picked by hand) resolve through the same
//! table, so the inverse mapping tier → code must be unique.

use crate::constants::DEFAULT_TIERS;
use crate::ledger_policy::Credits;

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierEntry {
    /// Canonical code value.
    pub code: String,
    /// Credits granted per redemption.
    pub credits: Credits,
}

/// Table construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierTableError {
    #[error("tier code must not be empty")]
    EmptyCode,

    #[error("tier for code {0} must be positive")]
    ZeroTier(String),

    #[error("duplicate tier code: {0}")]
    DuplicateCode(String),

    #[error("duplicate tier amount: {0}")]
    DuplicateTier(Credits),
}

/// Immutable code → tier mapping, kept sorted by tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<TierEntry>", into = "Vec<TierEntry>")
)]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

/// Normalize a raw scanned value for lookup and history.
pub fn normalize_code(raw: &str) -> &str {
    raw.trim()
}

impl TierTable {
    /// Build a table, rejecting empty codes, zero tiers and duplicates
    /// on either side of the mapping.
    pub fn new<I, S>(entries: I) -> Result<Self, TierTableError>
    where
        I: IntoIterator<Item = (S, Credits)>,
        S: Into<String>,
    {
        let mut rows: Vec<TierEntry> = Vec::new();
        for (code, credits) in entries {
            let code: String = code.into();
            let code = normalize_code(&code).to_owned();
            if code.is_empty() {
                return Err(TierTableError::EmptyCode);
            }
            if credits == 0 {
                return Err(TierTableError::ZeroTier(code));
            }
            if rows.iter().any(|r| r.code == code) {
                return Err(TierTableError::DuplicateCode(code));
            }
            if rows.iter().any(|r| r.credits == credits) {
                return Err(TierTableError::DuplicateTier(credits));
            }
            rows.push(TierEntry { code, credits });
        }
        rows.sort_by_key(|r| r.credits);
        Ok(Self { entries: rows })
    }

    /// Credits granted for `code`, if it is a known code.
    pub fn tier_for(&self, code: &str) -> Option<Credits> {
        let code = normalize_code(code);
        self.entries
            .iter()
            .find(|r| r.code == code)
            .map(|r| r.credits)
    }

    /// Canonical code for a manually selected tier.
    pub fn code_for(&self, tier: Credits) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.credits == tier)
            .map(|r| r.code.as_str())
    }

    /// Selectable tiers, ascending.
    pub fn tiers(&self) -> Vec<Credits> {
        self.entries.iter().map(|r| r.credits).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let mut entries: Vec<TierEntry> = DEFAULT_TIERS
            .iter()
            .map(|(code, credits)| TierEntry {
                code: (*code).to_owned(),
                credits: *credits,
            })
            .collect();
        entries.sort_by_key(|r| r.credits);
        Self { entries }
    }
}

impl TryFrom<Vec<TierEntry>> for TierTable {
    type Error = TierTableError;

    fn try_from(entries: Vec<TierEntry>) -> Result<Self, Self::Error> {
        TierTable::new(entries.into_iter().map(|e| (e.code, e.credits)))
    }
}

impl From<TierTable> for Vec<TierEntry> {
    fn from(table: TierTable) -> Self {
        table.entries
    }
}
