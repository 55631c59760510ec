use std::sync::Arc;

use opentask_core::{ServiceError, new_id, now_rfc3339};
use opentask_doc::DocStore;
use serde_json::{Map, Value};

use crate::model::{DeletedTask, Task, TaskListPage, TaskStatus, UpdateTaskRequest};
use crate::store::TaskStore;

/// Business logic for the task module.
///
/// Every operation is a standalone transaction against the store; the
/// service never holds state between calls.
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub async fn new(db: Arc<dyn DocStore>) -> Result<Self, ServiceError> {
        Ok(Self {
            store: TaskStore::new(db).await?,
        })
    }

    /// Create a task with status OPEN. Both timestamps come from one
    /// clock reading, so a fresh task always has `createdAt ==
    /// updatedAt`.
    pub async fn create_task(
        &self,
        title: String,
        description: String,
    ) -> Result<Task, ServiceError> {
        let now = now_rfc3339();
        let task = Task {
            id: new_id(),
            title,
            description,
            status: TaskStatus::Open,
            created_at: now.clone(),
            updated_at: now,
        };

        let stored = self.store.insert(&task).await?;
        if stored.id.is_empty() {
            return Err(ServiceError::Failed("Failed to create task".to_string()));
        }
        Ok(stored)
    }

    /// List one page of tasks. An empty store yields an empty page,
    /// not an error.
    pub async fn task_list(
        &self,
        page_number: i64,
        page_length: i64,
    ) -> Result<TaskListPage, ServiceError> {
        let (task_list, total) = self.store.get_all_tasks(page_number, page_length).await?;
        Ok(TaskListPage {
            task_list,
            total,
            page_number,
        })
    }

    pub async fn task_detail(&self, id: &str) -> Result<Task, ServiceError> {
        self.store
            .find_one(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))
    }

    /// Apply a partial update and return the post-update task.
    ///
    /// Empty strings and status 0 count as "not provided" and are
    /// skipped; `updatedAt` always refreshes, so an all-empty request
    /// still bumps the modification time.
    pub async fn update_task(
        &self,
        id: &str,
        req: &UpdateTaskRequest,
    ) -> Result<Task, ServiceError> {
        let mut patch = Map::new();
        patch.insert("updatedAt".to_string(), Value::String(now_rfc3339()));

        if let Some(ref title) = req.title {
            if !title.is_empty() {
                patch.insert("title".to_string(), Value::String(title.clone()));
            }
        }
        if let Some(ref description) = req.description {
            if !description.is_empty() {
                patch.insert("description".to_string(), Value::String(description.clone()));
            }
        }
        if let Some(status) = req.status {
            if status != 0 {
                patch.insert("status".to_string(), Value::Number(status.into()));
            }
        }

        self.store
            .find_one_and_update(id, Value::Object(patch))
            .await?
            .ok_or_else(|| ServiceError::Failed("Failed to update task".to_string()))
    }

    /// Delete a task. Exactly one removed document counts as success.
    pub async fn delete_task(&self, id: &str) -> Result<DeletedTask, ServiceError> {
        let deleted = self.store.delete_one(id).await?;
        if deleted != 1 {
            return Err(ServiceError::Failed(
                "Failed to delete task/ Task not found".to_string(),
            ));
        }

        Ok(DeletedTask {
            message: "Task deleted successfully".to_string(),
            id: id.to_string(),
        })
    }
}
