//! Scan source contract.
//!
//! A scan action yields at most one decoded string. Camera permission
//! and platform support failures are not errors for the ledger; they
//! mean no attempt was produced.

use async_trait::async_trait;

/// Why a scan action produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("barcode scanning is not supported on this device")]
    Unsupported,
}

#[async_trait]
pub trait ScanSource: Send {
    /// Run one user-initiated scan. `Ok(None)` when the user backed out
    /// without reading a code.
    async fn scan(&mut self) -> Result<Option<String>, ScanError>;
}
