use std::{hash::Hash, io::ErrorKind, path::{Path, PathBuf}, sync::Arc};
use indexmap::IndexMap;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists an insertion-ordered map to a JSON file and rewrites the whole
/// file after every mutation. The in-memory map is a write-through cache of
/// the file; nothing is buffered.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<IndexMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    ///
    /// A file that exists but cannot be parsed yields [`ServiceError::Corrupt`];
    /// callers are expected to treat that as fatal.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let map: IndexMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Corrupt(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty: IndexMap<K, V> = IndexMap::new();
                write_map(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Storage(format!("{}: {e}", file_path.display()))),
        };

        info!(path = %file_path.display(), entries = map.len(), "json store loaded");
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Number of entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// List all entries as `(key, value)` pairs in insertion order.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Run a read-only closure against the map without cloning it.
    pub async fn read_map<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&IndexMap<K, V>) -> T,
    {
        let map = self.inner.read().await;
        f(&*map)
    }

    /// Apply a mutation to the underlying map and persist it.
    ///
    /// The closure returns its result together with a flag telling whether the
    /// map changed; unchanged maps are not rewritten. The write lock is held
    /// across the file write so file contents follow mutation order.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut IndexMap<K, V>) -> Result<(T, bool), ServiceError>,
    {
        let mut map = self.inner.write().await;
        let (out, changed) = f(&mut *map)?;
        if changed {
            write_map(&self.file_path, &*map).await?;
            debug!(path = %self.file_path.display(), entries = map.len(), "json store saved");
        }
        Ok(out)
    }
}

async fn write_map<K, V>(path: &Path, map: &IndexMap<K, V>) -> Result<(), ServiceError>
where
    K: Eq + Hash + serde::Serialize,
    V: serde::Serialize,
{
    let data = serde_json::to_vec(map).map_err(|e| ServiceError::Encode(e.to_string()))?;
    fs::write(path, data)
        .await
        .map_err(|e| ServiceError::Storage(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{prefix}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("json_map_store");
        let store = JsonMapStore::<String, i64>::new(&tmp).await?;

        // missing file is created with an empty map
        assert!(store.is_empty().await);
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{}");

        store
            .update_map(|m| {
                m.insert("b".into(), 2);
                m.insert("a".into(), 1);
                Ok(((), true))
            })
            .await?;
        assert_eq!(store.get(&"a".into()).await, Some(1));
        assert_eq!(store.len().await, 2);

        // reload keeps insertion order
        let reloaded = JsonMapStore::<String, i64>::new(&tmp).await?;
        assert_eq!(reloaded.list().await, vec![("b".to_string(), 2), ("a".to_string(), 1)]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unchanged_update_does_not_rewrite() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("json_map_store_nochange");
        let store = JsonMapStore::<String, i64>::new(&tmp).await?;
        // replace the file behind the store's back; an unchanged update must leave it alone
        tokio::fs::write(&tmp, b"{\"x\":9}").await?;
        let seen = store.update_map(|m| Ok((m.len(), false))).await?;
        assert_eq!(seen, 0);
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{\"x\":9}");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_is_not_persisted() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("json_map_store_err");
        let store = JsonMapStore::<String, i64>::new(&tmp).await?;
        let res: Result<(), _> = store
            .update_map(|_| Err(ServiceError::Validation("nope".into())))
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{}");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn write_failure_keeps_mutation_in_memory() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("json_map_store_unwritable");
        let store = JsonMapStore::<String, i64>::new(&tmp).await?;
        // a directory at the store path makes every rewrite fail
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        let res = store
            .update_map(|m| {
                m.insert("a".into(), 4);
                Ok(((), true))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(store.get(&"a".into()).await, Some(4));

        let _ = tokio::fs::remove_dir_all(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_fatal()-> Result<(), anyhow::Error> {
        let tmp = tmp_path("json_map_store_bad");
        tokio::fs::write(&tmp, b"{not json").await?;
        let res = JsonMapStore::<String, i64>::new(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Corrupt(_))));
        // the broken file is left in place for the operator
        assert_eq!(tokio::fs::read_to_string(&tmp).await?, "{not json");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn creates_parent_directories() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_map_store_dir_{}", uuid::Uuid::new_v4()));
        let tmp = dir.join("nested").join("store.json");
        let store = JsonMapStore::<String, Vec<u64>>::new(&tmp).await?;
        assert_eq!(store.path(), tmp.as_path());
        assert!(tokio::fs::metadata(&tmp).await?.is_file());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
