use async_trait::async_trait;
use serde_json::Value;

use crate::error::DocError;

/// One page of documents plus the collection-wide total.
#[derive(Debug, Clone)]
pub struct DocPage {
    pub docs: Vec<Value>,
    pub total: u64,
}

/// Backend-agnostic JSON document store.
///
/// Documents are JSON objects identified by a string `id` field.
/// Modules depend on this trait; the binary picks the implementation.
#[async_trait]
pub trait DocStore: Send + Sync {
    /// Create the collection (and its indexes) if it does not exist.
    async fn ensure_collection(&self, collection: &str) -> Result<(), DocError>;

    /// Insert a document, assigning `id` and `createdAt` when absent.
    /// Returns the document as stored.
    async fn insert(&self, collection: &str, doc: Value) -> Result<Value, DocError>;

    /// Fetch a single document by id.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, DocError>;

    /// Fetch every document, oldest first.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, DocError>;

    /// Merge `patch` into the document with the given id and return the
    /// updated document, or `None` when no such document exists.
    async fn find_one_and_update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, DocError>;

    /// Delete a document by id. Returns the number of rows removed.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<u64, DocError>;

    /// Fetch one page of documents, oldest first, together with the
    /// total count across the whole collection.
    async fn page(&self, collection: &str, offset: i64, limit: i64) -> Result<DocPage, DocError>;
}
