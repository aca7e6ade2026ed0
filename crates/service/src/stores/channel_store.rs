use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the per-guild allowed-channel list.
/// A guild without an entry is unrestricted.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    async fn is_allowed(&self, guild: &str, channel: u64) -> bool;
    /// Returns `false` when the channel was already allowed.
    async fn add(&self, guild: &str, channel: u64) -> Result<bool, ServiceError>;
    /// Returns `false` when the channel was not in the list.
    async fn remove(&self, guild: &str, channel: u64) -> Result<bool, ServiceError>;
    async fn channels(&self, guild: &str) -> Vec<u64>;
}
