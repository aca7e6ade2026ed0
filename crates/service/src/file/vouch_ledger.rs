use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::stores::VouchStore;

/// File-backed vouch ledger.
/// Keeps a map of `user_id -> count` persisted as JSON, in first-seen order.
///
/// Counts are stored as signed integers so files written by older tooling
/// with negative values still load; reads clamp them to zero.
#[derive(Clone)]
pub struct VouchLedger {
    store: Arc<JsonMapStore<String, i64>>,
}

fn clamp(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

impl VouchLedger {
    /// Initialize the ledger from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, i64>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn get(&self, user: &str) -> u64 {
        self.store.get(&user.to_string()).await.map(clamp).unwrap_or(0)
    }

    /// `count[user] = max(count[user] + delta, 0)`, creating the record when absent.
    #[instrument(skip(self), fields(path = %self.store.path().display()))]
    pub async fn increment_by(&self, user: &str, delta: i64) -> Result<u64, ServiceError> {
        if user.trim().is_empty() {
            return Err(ServiceError::empty_key("user"));
        }
        let total = self
            .store
            .update_map(|map| {
                let entry = map.entry(user.to_string()).or_insert(0);
                *entry = (*entry).max(0).saturating_add(delta).max(0);
                Ok((clamp(*entry), true))
            })
            .await?;
        info!(%user, delta, total, "vouches_updated");
        Ok(total)
    }

    /// Ranked `(user, count)` pairs, highest first; equal counts keep insertion order.
    pub async fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .store
            .list()
            .await
            .into_iter()
            .map(|(user, count)| (user, clamp(count)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Number of users with a record.
    pub async fn len(&self) -> usize {
        self.store.len().await
    }
}

#[async_trait::async_trait]
impl VouchStore for VouchLedger {
    async fn get(&self, user: &str) -> u64 { self.get(user).await }
    async fn increment_by(&self, user: &str, delta: i64) -> Result<u64, ServiceError> {
        self.increment_by(user, delta).await
    }
    async fn top(&self, n: usize) -> Vec<(String, u64)> { self.top(n).await }
}
