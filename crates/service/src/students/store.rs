use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::students::domain::{Student, StudentId, StudentRecord, DUPLICATE_MESSAGE};

/// Storage backend for student records.
///
/// Implementations must run the duplicate check and the write as one atomic step,
/// so two concurrent writers can never both claim the same name pair.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<StudentRecord>;
    async fn get(&self, id: StudentId) -> Option<Student>;
    /// Assign the next id and store `record` unless its name pair is taken.
    async fn insert_unique(&self, record: StudentRecord) -> Result<Student, ServiceError>;
    /// Overwrite the record at `id` unless another record holds the new name pair.
    async fn update_unique(&self, id: StudentId, record: StudentRecord) -> Result<Student, ServiceError>;
    async fn len(&self) -> usize;
}

#[derive(Debug, Default)]
struct StudentTable {
    last_id: StudentId,
    rows: BTreeMap<StudentId, StudentRecord>,
}

impl StudentTable {
    fn next_id(&mut self) -> StudentId {
        self.last_id += 1;
        self.last_id
    }

    /// Rejects when more than one record holds the pair, or exactly one does and it is not `owner`.
    fn ensure_unique(&self, record: &StudentRecord, owner: Option<StudentId>) -> Result<(), ServiceError> {
        let mut holders = self.rows.iter().filter(|(_, r)| *r == record).map(|(id, _)| *id);
        match (holders.next(), holders.next()) {
            (None, _) => Ok(()),
            (Some(id), None) if Some(id) == owner => Ok(()),
            _ => Err(ServiceError::Conflict(DUPLICATE_MESSAGE.into())),
        }
    }
}

/// Process-local store. Ids come from a counter so they are never reused.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    inner: RwLock<StudentTable>,
}

impl MemoryStudentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> Vec<StudentRecord> {
        let table = self.inner.read().await;
        table.rows.values().cloned().collect()
    }

    async fn get(&self, id: StudentId) -> Option<Student> {
        let table = self.inner.read().await;
        table.rows.get(&id).map(|r| r.with_id(id))
    }

    async fn insert_unique(&self, record: StudentRecord) -> Result<Student, ServiceError> {
        let mut table = self.inner.write().await;
        table.ensure_unique(&record, None)?;
        let id = table.next_id();
        let stored = record.with_id(id);
        table.rows.insert(id, record);
        Ok(stored)
    }

    async fn update_unique(&self, id: StudentId, record: StudentRecord) -> Result<Student, ServiceError> {
        let mut table = self.inner.write().await;
        if !table.rows.contains_key(&id) {
            return Err(ServiceError::not_found("Student"));
        }
        table.ensure_unique(&record, Some(id))?;
        let existed = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("Student"))?;
        existed.first_name = record.first_name;
        existed.last_name = record.last_name;
        Ok(existed.with_id(id))
    }

    async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}
