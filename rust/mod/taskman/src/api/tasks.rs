use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use opentask_core::{Envelope, ServiceError, is_valid_id};

use crate::model::{
    CreateTaskRequest, DEFAULT_PAGE_LENGTH, DEFAULT_PAGE_NUMBER, TaskListQuery, TaskStatus,
    UpdateTaskRequest,
};
use crate::service::TaskService;

type ServiceState = Arc<TaskService>;

pub fn router(service: Arc<TaskService>) -> Router {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(service)
}

/// Wrap serializable data in a success envelope.
fn success(data: impl serde::Serialize) -> Result<Envelope, ServiceError> {
    let data = serde_json::to_value(data).map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok(Envelope::success(data))
}

/// Parse a pagination parameter: absent means `default`, anything that
/// is not a positive integer is rejected.
fn parse_page(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw {
        None => Some(default),
        Some(s) => s.parse::<i64>().ok().filter(|n| *n > 0),
    }
}

// ---------------------------------------------------------------------------
// POST /tasks
// ---------------------------------------------------------------------------

async fn create_task(
    State(service): State<ServiceState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Envelope, ServiceError> {
    // An unreadable body validates like an empty one.
    let Json(req) = body.unwrap_or_else(|_| Json(CreateTaskRequest::default()));

    if req.title.is_empty() {
        return Err(ServiceError::Validation("Title is required".to_string()));
    }
    if req.description.is_empty() {
        return Err(ServiceError::Validation("Description is required".to_string()));
    }

    let task = service.create_task(req.title, req.description).await?;
    success(task)
}

// ---------------------------------------------------------------------------
// GET /tasks
// ---------------------------------------------------------------------------

async fn list_tasks(
    State(service): State<ServiceState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Envelope, ServiceError> {
    let page_number = parse_page(query.page_number.as_deref(), DEFAULT_PAGE_NUMBER)
        .ok_or_else(|| ServiceError::Validation("Invalid page number".to_string()))?;
    let page_length = parse_page(query.page_length.as_deref(), DEFAULT_PAGE_LENGTH)
        .ok_or_else(|| ServiceError::Validation("Invalid page length".to_string()))?;

    let page = service.task_list(page_number, page_length).await?;
    success(page)
}

// ---------------------------------------------------------------------------
// GET /tasks/:id
// ---------------------------------------------------------------------------

async fn get_task(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Envelope, ServiceError> {
    if !is_valid_id(&id) {
        return Err(ServiceError::Validation(
            "Task id is not correct. Please pass correct task id".to_string(),
        ));
    }

    let task = service.task_detail(&id).await?;
    success(task)
}

// ---------------------------------------------------------------------------
// PUT /tasks/:id
// ---------------------------------------------------------------------------

async fn update_task(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Envelope, ServiceError> {
    let Json(req) = body.unwrap_or_else(|_| Json(UpdateTaskRequest::default()));

    if !is_valid_id(&id) {
        return Err(ServiceError::Validation(
            "Task id is not correct. Please pass correct task id".to_string(),
        ));
    }
    // Status 0 reads as "not provided", so only non-zero values are
    // checked against the enum.
    if let Some(status) = req.status {
        if status != 0 && TaskStatus::try_from(status).is_err() {
            return Err(ServiceError::Validation(
                "Status is not correct. Please pass correct status".to_string(),
            ));
        }
    }

    let task = service.update_task(&id, &req).await?;
    success(task)
}

// ---------------------------------------------------------------------------
// DELETE /tasks/:id
// ---------------------------------------------------------------------------

async fn delete_task(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Envelope, ServiceError> {
    if !is_valid_id(&id) {
        return Err(ServiceError::Validation(
            "Task id is not correct. Please pass correct task id".to_string(),
        ));
    }

    let deleted = service.delete_task(&id).await?;
    success(deleted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
