use async_trait::async_trait;

use super::domain::{Hospital, HospitalId, HospitalInput};
use crate::errors::ServiceError;

/// Repository abstraction for the hospital collection.
/// Mutations are atomic with respect to each other; reads never observe a half-applied one.
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Full collection; storage faults degrade to an empty list.
    async fn list(&self) -> Vec<Hospital>;
    /// Full collection, surfacing the read fault that `list` would hide.
    async fn try_list(&self) -> Result<Vec<Hospital>, ServiceError> {
        Ok(self.list().await)
    }
    async fn get(&self, id: HospitalId) -> Result<Hospital, ServiceError>;
    async fn create(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError>;
    async fn update(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError>;
    async fn delete(&self, id: HospitalId) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockHospitalRepository {
        items: Mutex<Vec<Hospital>>,
        // when set, every mutation fails as if the data file could not be written
        fail_writes: bool,
    }

    impl MockHospitalRepository {
        pub fn failing_writes() -> Self {
            Self { items: Mutex::default(), fail_writes: true }
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes {
                return Err(ServiceError::Persistence("mock write failure".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl HospitalRepository for MockHospitalRepository {
        async fn list(&self) -> Vec<Hospital> {
            self.items.lock().unwrap().clone()
        }

        async fn get(&self, id: HospitalId) -> Result<Hospital, ServiceError> {
            let items = self.items.lock().unwrap();
            items.iter().find(|h| h.id == id).cloned().ok_or_else(|| ServiceError::not_found("hospital"))
        }

        async fn create(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> {
            let mut items = self.items.lock().unwrap();
            if items.iter().any(|h| h.id == id) {
                return Err(ServiceError::already_exists("hospital"));
            }
            self.check_writable()?;
            let h = Hospital::new(id, input);
            items.push(h.clone());
            Ok(h)
        }

        async fn update(&self, id: HospitalId, input: HospitalInput) -> Result<Hospital, ServiceError> {
            let mut items = self.items.lock().unwrap();
            let existing = items.iter_mut().find(|h| h.id == id).ok_or_else(|| ServiceError::not_found("hospital"))?;
            self.check_writable()?;
            existing.apply(input);
            Ok(existing.clone())
        }

        async fn delete(&self, id: HospitalId) -> Result<(), ServiceError> {
            let mut items = self.items.lock().unwrap();
            let pos = items.iter().position(|h| h.id == id).ok_or_else(|| ServiceError::not_found("hospital"))?;
            self.check_writable()?;
            items.remove(pos);
            Ok(())
        }
    }
}
