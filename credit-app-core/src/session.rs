//! Session orchestrator — wires scan and selection events through the
//! ledger policy into the gateway.
//!
//! The session holds one account snapshot. Each accepted redemption
//! replaces the snapshot with the policy's result and then persists it
//! immediately. Methods take `&mut self`, so a second write cannot
//! start while one is outstanding.

use credit_core::ledger_policy::{
    attempt_from_code, attempt_from_tier, evaluate_redemption, redemptions_of, reset_account,
};
use credit_core::{CreditError, Credits, RedemptionAttempt, TierTable, UserAccount};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::gateway::AccountGateway;
use crate::identity::IdentityProvider;
use crate::scan::{ScanError, ScanSource};

/// Where the session stands after the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity from the provider.
    SignedOut,
    /// Signed in, but the store has no account record.
    NoAccount,
    /// Signed in, but the account lookup failed. Nothing is known about
    /// the record; `load` again to retry.
    Unavailable,
    /// Account snapshot held.
    Ready,
}

/// Result of one accepted redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionReport {
    pub code: String,
    pub credited: Credits,
    pub balance: Credits,
    /// Uses of `code` including this one.
    pub uses: u32,
    pub cap: u32,
}

/// What a scan action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Scanner unavailable; nothing was attempted.
    NoAttempt(ScanError),
    /// Scanner closed without reading a code.
    Cancelled,
    Redeemed(RedemptionReport),
}

pub struct CreditSession<G> {
    gateway: G,
    table: TierTable,
    state: SessionState,
    account: Option<UserAccount>,
    selected_tier: Option<Credits>,
    needs_sync: bool,
}

impl<G: AccountGateway> CreditSession<G> {
    pub fn new(gateway: G, table: TierTable) -> Self {
        Self {
            gateway,
            table,
            state: SessionState::SignedOut,
            account: None,
            selected_tier: None,
            needs_sync: false,
        }
    }

    pub fn from_config(gateway: G, config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(gateway, config.tier_table()?))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current snapshot. Stale until [`load`](Self::load) resolves.
    pub fn account(&self) -> Option<&UserAccount> {
        self.account.as_ref()
    }

    pub fn tier_table(&self) -> &TierTable {
        &self.table
    }

    pub fn selected_tier(&self) -> Option<Credits> {
        self.selected_tier
    }

    /// `true` when the held snapshot has not reached the store.
    pub fn needs_sync(&self) -> bool {
        self.needs_sync
    }

    /// Resolve the signed-in identity and fetch its account.
    pub async fn load<P>(&mut self, identity: &P) -> Result<SessionState, CreditError>
    where
        P: IdentityProvider + ?Sized,
    {
        self.account = None;
        self.needs_sync = false;

        let Some(who) = identity.current_identity().await else {
            self.state = SessionState::SignedOut;
            debug!("no signed-in identity");
            return Ok(self.state);
        };

        match self.gateway.fetch_current_user(&who).await {
            Ok(Some(account)) => {
                info!(account = %account.id, balance = account.balance, "session ready");
                self.account = Some(account);
                self.state = SessionState::Ready;
            }
            Ok(None) => {
                warn!(uid = %who.uid, "signed in without an account record");
                self.state = SessionState::NoAccount;
            }
            Err(e) => {
                warn!(uid = %who.uid, error = %e, "account lookup failed");
                self.state = SessionState::Unavailable;
                return Err(e);
            }
        }
        Ok(self.state)
    }

    /// Record a manual tier selection.
    pub fn select_tier(&mut self, tier: Credits) -> Result<(), CreditError> {
        if self.table.code_for(tier).is_none() {
            return Err(CreditError::InvalidCode);
        }
        self.selected_tier = Some(tier);
        Ok(())
    }

    /// Redeem the canonical code of the selected tier.
    pub async fn redeem_selected(&mut self) -> Result<RedemptionReport, CreditError> {
        let tier = self.selected_tier.ok_or(CreditError::InvalidCode)?;
        let attempt = attempt_from_tier(&self.table, tier)?;
        self.redeem(attempt).await
    }

    /// Redeem a scanned value.
    pub async fn redeem_code(&mut self, raw: &str) -> Result<RedemptionReport, CreditError> {
        let attempt = attempt_from_code(&self.table, raw).inspect_err(|_| {
            info!("scanned code not in tier table");
        })?;
        if let Some(selected) = self.selected_tier {
            if selected != attempt.amount {
                warn!(
                    selected,
                    scanned = attempt.amount,
                    "scanned tier differs from selection; crediting scanned tier"
                );
            }
        }
        self.redeem(attempt).await
    }

    /// Run one scan and redeem whatever it reads.
    pub async fn scan_and_redeem<S>(&mut self, source: &mut S) -> Result<ScanOutcome, CreditError>
    where
        S: ScanSource + ?Sized,
    {
        match source.scan().await {
            Err(e) => {
                info!(reason = %e, "scan produced no attempt");
                Ok(ScanOutcome::NoAttempt(e))
            }
            Ok(None) => Ok(ScanOutcome::Cancelled),
            Ok(Some(raw)) => self.redeem_code(&raw).await.map(ScanOutcome::Redeemed),
        }
    }

    /// Clear balance and history. Does nothing unless `confirmed`.
    pub async fn reset(&mut self, confirmed: bool) -> Result<bool, CreditError> {
        if !confirmed {
            return Ok(false);
        }
        let account = self.loaded()?;
        let next = account.apply(reset_account(account));
        info!(account = %next.id, "account reset");
        self.account = Some(next);
        self.flush().await?;
        Ok(true)
    }

    /// Re-send the held snapshot after a failed persist.
    pub async fn retry_persist(&mut self) -> Result<(), CreditError> {
        if !self.needs_sync {
            return Ok(());
        }
        self.flush().await
    }

    pub fn sign_out(&mut self) {
        self.account = None;
        self.selected_tier = None;
        self.needs_sync = false;
        self.state = SessionState::SignedOut;
    }

    fn loaded(&self) -> Result<&UserAccount, CreditError> {
        self.account
            .as_ref()
            .ok_or_else(|| CreditError::LookupFailed("no account loaded".into()))
    }

    async fn redeem(
        &mut self,
        attempt: RedemptionAttempt,
    ) -> Result<RedemptionReport, CreditError> {
        let account = self.loaded()?;
        let cap = account.role.redemption_cap();
        let update = evaluate_redemption(&self.table, account, &attempt)
            .into_result()
            .inspect_err(|e| {
                info!(account = %account.id, code = e.code(), "redemption rejected");
            })?;

        let next = account.apply(update);
        let report = RedemptionReport {
            uses: redemptions_of(&next.redeemed_codes, &attempt.code),
            code: attempt.code,
            credited: attempt.amount,
            balance: next.balance,
            cap,
        };
        info!(
            account = %next.id,
            credited = report.credited,
            balance = report.balance,
            "redemption accepted"
        );
        self.account = Some(next);
        self.flush().await?;
        Ok(report)
    }

    /// Persist the held snapshot. On failure the snapshot is kept and
    /// marked for [`retry_persist`](Self::retry_persist).
    async fn flush(&mut self) -> Result<(), CreditError> {
        let account = self.loaded()?;
        let result = self
            .gateway
            .persist(&account.id, account.balance, &account.redeemed_codes)
            .await;
        self.needs_sync = result.is_err();
        result
    }
}
