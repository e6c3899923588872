use std::{path::PathBuf, sync::Arc};

use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::hospital::{Hospital, HospitalId, HospitalInput, HospitalRepository};
use crate::storage::JsonVecStore;

/// File-backed hospital collection, persisted as a JSON array of records.
#[derive(Clone)]
pub struct HospitalStore {
    store: Arc<JsonVecStore<Hospital>>,
}

impl HospitalStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonVecStore::<Hospital>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn path(&self) -> PathBuf {
        self.store.path().await
    }

    pub async fn list(&self) -> Vec<Hospital> {
        self.store.snapshot().await
    }

    pub async fn try_list(&self) -> Result<Vec<Hospital>, ServiceError> {
        self.store.try_snapshot().await
    }

    /// Linear scan for `id`.
    pub async fn get(&self, id: HospitalId) -> Result<Hospital, ServiceError> {
        self.store
            .snapshot()
            .await
            .into_iter()
            .find(|h| h.id == id)
            .ok_or_else(|| ServiceError::not_found("hospital"))
    }

    pub async fn count(&self) -> usize {
        self.store.snapshot().await.len()
    }

    pub async fn contains(&self, id: HospitalId) -> bool {
        self.store.snapshot().await.iter().any(|h| h.id == id)
    }

    /// Append a new record; fails if `id` is taken.
    pub async fn create(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> {
        let created = self
            .store
            .mutate(|items| {
                if items.iter().any(|h| h.id == id) {
                    return Err(ServiceError::already_exists("hospital"));
                }
                let h = Hospital::new(id, input);
                items.push(h.clone());
                Ok(h)
            })
            .await?;
        info!(id, "hospital created");
        Ok(created)
    }

    /// Replace the mutable fields in place, keeping `id` and position.
    pub async fn update(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> {
        let updated = self
            .store
            .mutate(|items| {
                let existing = items
                    .iter_mut()
                    .find(|h| h.id == id)
                    .ok_or_else(|| ServiceError::not_found("hospital"))?;
                existing.apply(input);
                Ok(existing.clone())
            })
            .await?;
        info!(id, "hospital updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: HospitalId) -> Result<(), ServiceError> {
        self.store
            .mutate(|items| {
                let pos = items
                    .iter()
                    .position(|h| h.id == id)
                    .ok_or_else(|| ServiceError::not_found("hospital"))?;
                items.remove(pos);
                Ok(())
            })
            .await?;
        debug!(id, "hospital deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl HospitalRepository for HospitalStore {
    async fn list(&self) -> Vec<Hospital> { self.list().await }
    async fn try_list(&self) -> Result<Vec<Hospital>, ServiceError> { self.try_list().await }
    async fn get(&self, id: HospitalId) -> Result<Hospital, ServiceError> { self.get(id).await }
    async fn create(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> { self.create(id, input).await }
    async fn update(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: HospitalId) -> Result<(), ServiceError> { self.delete(id).await }
}
