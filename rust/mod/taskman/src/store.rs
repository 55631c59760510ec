use std::sync::Arc;

use opentask_core::ServiceError;
use opentask_doc::DocStore;
use serde_json::Value;

use crate::model::Task;

/// Collection backing the task module.
const COLLECTION: &str = "task";

/// Persistent storage for tasks, typed over a document store.
pub struct TaskStore {
    db: Arc<dyn DocStore>,
}

fn doc_to_task(doc: Value) -> Result<Task, ServiceError> {
    serde_json::from_value(doc).map_err(|e| ServiceError::Storage(e.to_string()))
}

impl TaskStore {
    /// Create the store, making sure the collection exists.
    pub async fn new(db: Arc<dyn DocStore>) -> Result<Self, ServiceError> {
        db.ensure_collection(COLLECTION)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Self { db })
    }

    /// Insert a task and return it as stored.
    pub async fn insert(&self, task: &Task) -> Result<Task, ServiceError> {
        let doc = serde_json::to_value(task).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let stored = self
            .db
            .insert(COLLECTION, doc)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        doc_to_task(stored)
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<Task>, ServiceError> {
        let doc = self
            .db
            .find_by_id(COLLECTION, id)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        doc.map(doc_to_task).transpose()
    }

    /// Merge `patch` into the stored document and return the updated
    /// task, or `None` when the id matches nothing.
    pub async fn find_one_and_update(
        &self,
        id: &str,
        patch: Value,
    ) -> Result<Option<Task>, ServiceError> {
        let doc = self
            .db
            .find_one_and_update(COLLECTION, id, patch)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        doc.map(doc_to_task).transpose()
    }

    /// Delete a task by id. Returns the number of rows removed.
    pub async fn delete_one(&self, id: &str) -> Result<u64, ServiceError> {
        self.db
            .delete_by_id(COLLECTION, id)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Fetch one page of tasks (1-based page number), oldest first,
    /// together with the collection-wide total. A page past the end of
    /// the collection is empty, not an error.
    pub async fn get_all_tasks(
        &self,
        page_number: i64,
        page_length: i64,
    ) -> Result<(Vec<Task>, u64), ServiceError> {
        let offset = page_number.saturating_sub(1).saturating_mul(page_length);
        let page = self
            .db
            .page(COLLECTION, offset, page_length)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let tasks = page
            .docs
            .into_iter()
            .map(doc_to_task)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((tasks, page.total))
    }
}
