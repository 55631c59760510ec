use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("document error: {0}")]
    Document(String),
}

impl From<sqlx::Error> for DocError {
    fn from(e: sqlx::Error) -> Self {
        DocError::Query(e.to_string())
    }
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        DocError::Document(e.to_string())
    }
}
