//! Service layer holding the bot's persistent state.
//! - `storage`: generic JSON file-backed map with write-through persistence.
//! - `stores`: trait seams the command layer depends on.
//! - `file`: file-backed vouch ledger and channel allowlist.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod stores;
pub mod file;
