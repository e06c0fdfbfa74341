use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, KeyValueStore};

/// A record persisted as one element of a JSON array under a fixed key.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key of the collection in the key-value store.
    const COLLECTION: &'static str;

    fn record_id(&self) -> Uuid;
}

/// Generic key-value repository implementation.
///
/// Every operation reads the whole collection, modifies it and writes it back.
/// Concurrent writers are not coordinated: the last write wins.
pub struct KvBaseRepository<T> {
    pub(crate) store: Arc<dyn KeyValueStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> KvBaseRepository<T>
where
    T: StoredRecord,
{
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Read the collection. A missing key is an empty collection.
    pub(crate) async fn load(&self) -> Result<Vec<T>, RepoError> {
        match self.store.get(T::COLLECTION).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::error!(collection = T::COLLECTION, error = %e, "Stored collection is corrupt");
                RepoError::Serialization(e.to_string())
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the collection.
    pub(crate) async fn persist(&self, records: &[T]) -> Result<(), RepoError> {
        let raw =
            serde_json::to_string(records).map_err(|e| RepoError::Serialization(e.to_string()))?;
        self.store.set(T::COLLECTION, &raw).await?;
        Ok(())
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for KvBaseRepository<T>
where
    T: StoredRecord,
{
    async fn list_all(&self) -> Result<Vec<T>, RepoError> {
        self.load().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let records = self.load().await?;
        Ok(records.into_iter().find(|r| r.record_id() == id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.record_id() != id);

        if records.len() == before {
            return Err(RepoError::NotFound);
        }

        self.persist(&records).await?;
        tracing::debug!(collection = T::COLLECTION, %id, "Record deleted");
        Ok(())
    }
}
