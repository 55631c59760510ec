use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a task.
///
/// Stored and transmitted as its ordinal:
///
/// ```text
/// 0 = OPEN, 1 = IN_PROGRESS, 2 = CLOSED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum TaskStatus {
    Open,
    InProgress,
    Closed,
}

impl From<TaskStatus> for i64 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Open => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Closed => 2,
        }
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Closed),
            other => Err(format!("invalid task status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Task — the core data model, stored as one JSON document
// ---------------------------------------------------------------------------

/// A single task tracked by the task module.
///
/// The whole struct is stored as one document; `createdAt` and
/// `updatedAt` are RFC 3339 strings and compare chronologically as
/// plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// API request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /tasks` — create a new task.
///
/// Defaults keep missing or unreadable bodies deserializable so the
/// validation layer can answer with the field-level message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

/// Body for `PUT /tasks/{id}` — partial update.
///
/// `status` stays a raw ordinal here so out-of-range values reach the
/// validation layer instead of failing JSON deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<i64>,
}

/// Query parameters for `GET /tasks`.
///
/// Kept as raw strings; the handler parses them strictly and rejects
/// anything that is not a positive integer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    #[serde(default)]
    pub page_number: Option<String>,

    #[serde(default)]
    pub page_length: Option<String>,
}

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_LENGTH: i64 = 10;

/// One page of tasks returned by `GET /tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListPage {
    pub task_list: Vec<Task>,
    pub total: u64,
    pub page_number: i64,
}

/// Confirmation returned by `DELETE /tasks/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTask {
    pub message: String,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_ordinal() {
        assert_eq!(serde_json::to_string(&TaskStatus::Open).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "1");
        assert_eq!(serde_json::to_string(&TaskStatus::Closed).unwrap(), "2");
    }

    #[test]
    fn status_ordinal_roundtrip() {
        for s in &[TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Closed] {
            let json = serde_json::to_string(s).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*s, back);
        }
    }

    #[test]
    fn status_rejects_unknown_ordinal() {
        assert!(serde_json::from_str::<TaskStatus>("3").is_err());
        assert!(serde_json::from_str::<TaskStatus>("-1").is_err());
    }

    #[test]
    fn task_json_uses_camel_case() {
        let task = Task {
            id: "abc".into(),
            title: "write report".into(),
            description: "quarterly numbers".into(),
            status: TaskStatus::Open,
            created_at: "2026-01-01T00:00:00+00:00".into(),
            updated_at: "2026-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"status\":0"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn create_request_defaults_to_empty_fields() {
        let req: CreateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.description.is_empty());
    }

    #[test]
    fn update_request_partial() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"status":2}"#).unwrap();
        assert_eq!(req.status, Some(2));
        assert!(req.title.is_none());
        assert!(req.description.is_none());
    }

    #[test]
    fn list_query_uses_camel_case() {
        let query: TaskListQuery =
            serde_json::from_str(r#"{"pageNumber":"2","pageLength":"5"}"#).unwrap();
        assert_eq!(query.page_number.as_deref(), Some("2"));
        assert_eq!(query.page_length.as_deref(), Some("5"));
    }

    #[test]
    fn list_page_serializes_camel_case() {
        let page = TaskListPage {
            task_list: vec![],
            total: 0,
            page_number: 1,
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"taskList\""));
        assert!(json.contains("\"pageNumber\""));
    }
}
