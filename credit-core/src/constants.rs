//! Ledger constants — redemption caps and the production tier table.
//!
//! The codes below are the values printed on the issued QR cards. They
//! are the seed for [`TierTable::default`](crate::tiers::TierTable) and
//! can be replaced wholesale through configuration.

use crate::ledger_policy::Credits;

/// Times a standard account may redeem the same code.
pub const STANDARD_REDEMPTION_CAP: u32 = 1;

/// Times an admin account may redeem the same code.
pub const ADMIN_REDEMPTION_CAP: u32 = 2;

/// Profile string that marks an admin account in the stored record.
pub const ADMIN_PROFILE: &str = "admin";

/// Canonical code for the 10-credit card.
pub const CODE_TIER_10: &str = "8c95def646b6127282ed50454b73240300dccabc";

/// Canonical code for the 50-credit card.
pub const CODE_TIER_50: &str = "ae338e4e0cbb4e4bcffaf9ce5b409feb8edd5172";

/// Canonical code for the 100-credit card.
pub const CODE_TIER_100: &str = "2786f4877b9091dcad7f35751bfcf5d5ea712b2f";

/// Production code → tier table, ascending by tier.
pub const DEFAULT_TIERS: [(&str, Credits); 3] = [
    (CODE_TIER_10, 10),
    (CODE_TIER_50, 50),
    (CODE_TIER_100, 100),
];
