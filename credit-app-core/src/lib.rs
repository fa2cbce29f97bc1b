//! Credit App Core — shared runtime for the credit scanner shells.
//!
//! Shells (mobile, desktop) own the camera, sign-in and rendering. This
//! crate owns everything between a scan event and a durable balance:
//!
//! - [`session`]: orchestrates load → evaluate → persist.
//! - [`gateway`]: account lookup and partial writes over a store.
//! - [`store`]: document store contract and an in-memory store.
//! - [`identity`] / [`scan`]: contracts the shell implements.
//! - [`config`]: JSON configuration.
//!
//! Ledger rules live in `credit-core`; nothing here decides whether a
//! code is accepted.

pub mod config;
pub mod gateway;
pub mod identity;
pub mod scan;
pub mod session;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use gateway::{AccountGateway, SessionIdentity, StoreGateway};
pub use identity::{IdentityProvider, StaticIdentity};
pub use scan::{ScanError, ScanSource};
pub use session::{CreditSession, RedemptionReport, ScanOutcome, SessionState};
pub use store::{Document, DocumentStore, MemoryDocumentStore, StoreError};
