pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use opentask_core::Module;
use opentask_doc::DocStore;

use service::TaskService;

/// The task module — CRUD over a single task collection.
///
/// Embed this in the server binary to get task creation, paginated
/// listing, detail lookup, partial update, and deletion.
pub struct TaskModule {
    service: Arc<TaskService>,
}

impl TaskModule {
    /// Create the task module and initialise its storage.
    pub async fn new(db: Arc<dyn DocStore>) -> Result<Self, opentask_core::ServiceError> {
        let service = Arc::new(TaskService::new(db).await?);
        Ok(Self { service })
    }
}

impl Module for TaskModule {
    fn name(&self) -> &str {
        "task"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
