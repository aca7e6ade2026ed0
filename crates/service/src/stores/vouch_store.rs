use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the per-user vouch ledger.
/// Counts are never negative.
#[async_trait]
pub trait VouchStore: Send + Sync {
    /// Current count for `user`, 0 when unknown.
    async fn get(&self, user: &str) -> u64;
    /// Set `count = max(count + delta, 0)` and persist; returns the new count.
    async fn increment_by(&self, user: &str, delta: i64) -> Result<u64, ServiceError>;
    /// Up to `n` users ranked by count, ties in insertion order.
    async fn top(&self, n: usize) -> Vec<(String, u64)>;
}
