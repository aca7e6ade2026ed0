//! Shared helpers for the bot workspace: logging setup and runtime checks.

pub mod env;
pub mod utils;
