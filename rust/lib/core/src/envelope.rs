use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Default message for validation failures.
pub const INVALID_PARAMETERS: &str = "Invalid Parameters";

/// Default message for business and unexpected failures.
pub const GENERIC_FAILURE: &str = "Something is wrong! We're looking into it.";

/// Message for authentication failures.
pub const AUTHENTICATION_FAILED: &str = "Authentication Failed";

/// Uniform JSON wrapper applied to every API response.
///
/// ```json
/// {"ok": true, "err": null, "data": {...}}
/// {"ok": false, "err": "Task not found", "data": null}
/// ```
///
/// Validation and business failures are NOT HTTP error statuses: they
/// return 200 with `ok: false`. Only authentication failure maps to a
/// non-200 status (401). `err` and `data` are always present (null when
/// inapplicable); `code` appears only when one was attached.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub ok: bool,
    pub err: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub data: Option<serde_json::Value>,
    #[serde(skip)]
    status: StatusCode,
}

impl Envelope {
    /// HTTP 200, `{ok: true, err: null, data}`.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            ok: true,
            err: None,
            code: None,
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// HTTP 200, `{ok: false, err: msg, data: null}`.
    ///
    /// An empty message falls back to [`INVALID_PARAMETERS`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            err: Some(non_empty_or(msg.into(), INVALID_PARAMETERS)),
            code: None,
            data: None,
            status: StatusCode::OK,
        }
    }

    /// HTTP 200, `{ok: false, err: msg, data: null}`.
    ///
    /// An empty message falls back to [`GENERIC_FAILURE`].
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            err: Some(non_empty_or(msg.into(), GENERIC_FAILURE)),
            code: None,
            data: None,
            status: StatusCode::OK,
        }
    }

    /// HTTP 401, `{ok: false, err: "Authentication Failed", data: null}`.
    ///
    /// The only envelope with a non-200 status. Never carries a code.
    pub fn unauthorized() -> Self {
        Self {
            ok: false,
            err: Some(AUTHENTICATION_FAILED.to_string()),
            code: None,
            data: None,
            status: StatusCode::UNAUTHORIZED,
        }
    }

    /// Attach a numeric error code to an invalid/failure envelope.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// HTTP status this envelope responds with.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, axum::Json(self)).into_response()
    }
}

fn non_empty_or(msg: String, default: &str) -> String {
    if msg.is_empty() { default.to_string() } else { msg }
}
