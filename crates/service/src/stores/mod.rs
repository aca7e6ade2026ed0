//! Trait seams for the bot's two stores.
//! The command layer depends on these, not on the file-backed implementations.

pub mod channel_store;
pub mod vouch_store;

pub use channel_store::ChannelStore;
pub use vouch_store::VouchStore;
