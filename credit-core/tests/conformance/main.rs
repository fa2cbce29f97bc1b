//! Conformance harness — error surface and tier table stability.
//!
//! The presentation layer keys its messages off these values, so any
//! drift here is a user-visible change.

mod error_code_mapping;
mod error_registry;
mod tier_table;
