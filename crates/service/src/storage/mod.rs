//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed map store shared by the vouch ledger
//! and the channel allowlist.

pub mod json_map_store;
