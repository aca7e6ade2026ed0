//! File-backed store implementations.

pub mod channel_allowlist;
pub mod vouch_ledger;
