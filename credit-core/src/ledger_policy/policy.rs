//! Redemption policy — pure accept/reject decisions.
//!
//! No IO, no clocks, no global state. Identical inputs produce
//! identical outcomes.

use super::types::{
    AccountUpdate, Credits, RedemptionAttempt, RedemptionOutcome, Rejection, UserAccount,
};
use crate::tiers::{normalize_code, TierTable};

/// Resolve a scanned value into an attempt.
pub fn attempt_from_code(table: &TierTable, raw: &str) -> Result<RedemptionAttempt, Rejection> {
    let code = normalize_code(raw);
    let amount = table.tier_for(code).ok_or(Rejection::InvalidCode)?;
    Ok(RedemptionAttempt {
        code: code.to_owned(),
        amount,
    })
}

/// Resolve a manually selected tier into an attempt carrying the
/// tier's canonical code.
pub fn attempt_from_tier(
    table: &TierTable,
    tier: Credits,
) -> Result<RedemptionAttempt, Rejection> {
    let code = table.code_for(tier).ok_or(Rejection::InvalidCode)?;
    Ok(RedemptionAttempt {
        code: code.to_owned(),
        amount: tier,
    })
}

/// Number of times `code` appears in `codes`. History entries are
/// compared in normalized form, so padded entries still count.
pub fn redemptions_of(codes: &[String], code: &str) -> u32 {
    let code = normalize_code(code);
    let n = codes.iter().filter(|c| normalize_code(c) == code).count();
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Decide whether `attempt` may be credited to `user`.
///
/// # Contract
///
/// - **Validity**: the attempt's code must resolve in `table` to exactly
///   `attempt.amount`; otherwise `InvalidCode`.
/// - **Cap**: with `cap = user.role.redemption_cap()` and `used` the
///   number of prior redemptions of the code, `used >= cap` is
///   `CodeExhausted { cap, used }`.
/// - **Accept**: balance grows by `amount` (saturating) and the code is
///   appended to the history.
/// - **Rejections** carry no update; the snapshot is never touched.
pub fn evaluate_redemption(
    table: &TierTable,
    user: &UserAccount,
    attempt: &RedemptionAttempt,
) -> RedemptionOutcome {
    let code = normalize_code(&attempt.code);
    match table.tier_for(code) {
        Some(tier) if tier == attempt.amount => {}
        _ => return RedemptionOutcome::Rejected(Rejection::InvalidCode),
    }

    let cap = user.role.redemption_cap();
    let used = redemptions_of(&user.redeemed_codes, code);
    if used >= cap {
        return RedemptionOutcome::Rejected(Rejection::CodeExhausted { cap, used });
    }

    let mut redeemed_codes = Vec::with_capacity(user.redeemed_codes.len() + 1);
    redeemed_codes.extend(user.redeemed_codes.iter().cloned());
    redeemed_codes.push(code.to_owned());

    RedemptionOutcome::Accepted(AccountUpdate {
        balance: user.balance.saturating_add(attempt.amount),
        redeemed_codes,
    })
}

/// Unconditional clear. Callers gate this behind explicit confirmation.
pub fn reset_account(_user: &UserAccount) -> AccountUpdate {
    AccountUpdate {
        balance: 0,
        redeemed_codes: Vec::new(),
    }
}
