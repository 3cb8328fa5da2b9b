use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::students::domain::{Student, StudentId, StudentInput, StudentRecord};
use crate::students::store::{MemoryStudentStore, StudentStore};

/// Application service encapsulating student business rules.
///
/// Check order on create: digits, empty, duplicate.
/// On update the id is resolved first, then the same three checks.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self { Self { store } }

    pub fn in_memory() -> Self {
        Self::new(MemoryStudentStore::new())
    }

    #[instrument(skip(self, input), fields(first_name = %input.first_name, last_name = %input.last_name))]
    pub async fn create(&self, input: StudentInput) -> Result<Student, ServiceError> {
        input.validate().inspect_err(|e| warn!(reason = %e, "student rejected"))?;
        let created = self
            .store
            .insert_unique(input.into())
            .await
            .inspect_err(|e| warn!(reason = %e, "student rejected"))?;
        let total = self.count().await;
        info!(id = created.id, total, "student created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<StudentRecord> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: StudentId) -> Result<Student, ServiceError> {
        self.store.get(id).await.ok_or_else(|| ServiceError::not_found("Student"))
    }

    #[instrument(skip(self, input), fields(first_name = %input.first_name, last_name = %input.last_name))]
    pub async fn update(&self, id: StudentId, input: StudentInput) -> Result<Student, ServiceError> {
        if self.store.get(id).await.is_none() {
            warn!(id, "student not found");
            return Err(ServiceError::not_found("Student"));
        }
        input.validate().inspect_err(|e| warn!(id, reason = %e, "update rejected"))?;
        let updated = self
            .store
            .update_unique(id, input.into())
            .await
            .inspect_err(|e| warn!(id, reason = %e, "update rejected"))?;
        info!(id, "student updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
