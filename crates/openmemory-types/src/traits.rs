//! Service trait implemented by the HTTP client.

use crate::{ClientError, JsonMap, ListQuery, Memory, NewMemory, SearchQuery, SearchResult};
use async_trait::async_trait;

/// OpenMemory REST surface. Each method is exactly one HTTP round trip; any
/// non-2xx status comes back as `ClientError::RequestFailed`.
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// `POST /memories`; returns the new memory id.
    async fn add_memory(&self, memory: &NewMemory) -> Result<String, ClientError>;

    /// `GET /memories/search`; results in server order.
    async fn search_memories(&self, query: &SearchQuery)
        -> Result<Vec<SearchResult>, ClientError>;

    /// `GET /memories/{id}`.
    async fn get_memory(&self, id: &str) -> Result<Memory, ClientError>;

    /// `DELETE /memories/{id}`; `false` when the response has no `deleted` field.
    async fn delete_memory(&self, id: &str) -> Result<bool, ClientError>;

    /// `GET /memories` with offset/limit pagination.
    async fn list_memories(&self, query: &ListQuery) -> Result<Vec<Memory>, ClientError>;

    /// `GET /health`.
    async fn health_check(&self) -> Result<JsonMap, ClientError>;

    /// `GET /stats`.
    async fn get_stats(&self) -> Result<JsonMap, ClientError>;
}
