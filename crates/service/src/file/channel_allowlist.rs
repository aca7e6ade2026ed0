use std::sync::Arc;
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::stores::ChannelStore;

/// File-backed allowlist of channels where gated commands may run.
/// Keeps a map of `guild_id -> [channel_id, ...]` persisted as JSON.
///
/// A guild with no entry is unrestricted. Removing the last channel of a
/// guild drops the entry, which lifts the restriction again.
#[derive(Clone)]
pub struct ChannelAllowlist {
    store: Arc<JsonMapStore<String, Vec<u64>>>,
}

impl ChannelAllowlist {
    /// Initialize the allowlist from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Vec<u64>>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn is_allowed(&self, guild: &str, channel: u64) -> bool {
        self.store
            .read_map(|map| map.get(guild).map_or(true, |channels| channels.contains(&channel)))
            .await
    }

    /// Allow `channel` in `guild`; returns `false` if it was already allowed.
    pub async fn add(&self, guild: &str, channel: u64) -> Result<bool, ServiceError> {
        if guild.trim().is_empty() {
            return Err(ServiceError::empty_key("guild"));
        }
        let added = self
            .store
            .update_map(|map| {
                let channels = map.entry(guild.to_string()).or_default();
                if channels.contains(&channel) {
                    return Ok((false, false));
                }
                channels.push(channel);
                Ok((true, true))
            })
            .await?;
        if added {
            info!(%guild, channel, "allowed_channel_added");
        }
        Ok(added)
    }

    /// Disallow `channel` in `guild`; returns `false` if it was not in the list.
    pub async fn remove(&self, guild: &str, channel: u64) -> Result<bool, ServiceError> {
        let removed = self
            .store
            .update_map(|map| {
                let Some(channels) = map.get_mut(guild) else {
                    return Ok((false, false));
                };
                let Some(pos) = channels.iter().position(|c| *c == channel) else {
                    return Ok((false, false));
                };
                channels.remove(pos);
                if channels.is_empty() {
                    map.shift_remove(guild);
                }
                Ok((true, true))
            })
            .await?;
        if removed {
            info!(%guild, channel, "allowed_channel_removed");
        }
        Ok(removed)
    }

    /// Allowed channels of a guild; empty when the guild is unrestricted.
    pub async fn channels(&self, guild: &str) -> Vec<u64> {
        self.store.get(&guild.to_string()).await.unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ChannelStore for ChannelAllowlist {
    async fn is_allowed(&self, guild: &str, channel: u64) -> bool { self.is_allowed(guild, channel).await }
    async fn add(&self, guild: &str, channel: u64) -> Result<bool, ServiceError> { self.add(guild, channel).await }
    async fn remove(&self, guild: &str, channel: u64) -> Result<bool, ServiceError> {
        self.remove(guild, channel).await
    }
    async fn channels(&self, guild: &str) -> Vec<u64> { self.channels(guild).await }
}
