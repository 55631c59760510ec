mod tasks;

use std::sync::Arc;
use axum::Router;

use crate::service::TaskService;

/// Build the complete task module router.
///
/// Routes:
/// - `POST   /tasks`       — create task
/// - `GET    /tasks`       — list tasks (paginated)
/// - `GET    /tasks/{id}`  — get task detail
/// - `PUT    /tasks/{id}`  — update task
/// - `DELETE /tasks/{id}`  — delete task
pub fn router(service: Arc<TaskService>) -> Router {
    tasks::router(service)
}
