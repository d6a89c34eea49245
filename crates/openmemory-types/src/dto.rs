//! Request and response DTOs for the OpenMemory REST API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Untyped JSON object (health, stats, record metadata).
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Default `limit` for `GET /memories/search`.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
/// Default `limit` for `GET /memories`.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Memory record as returned by the canister (get, list, and inside search hits).
///
/// Holds the decoded JSON exactly as sent: nothing is checked, defaulted, or
/// dropped, and serializing it gives back the same value. The accessors read
/// the usual fields and return `None` when a field is missing or has another type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory(serde_json::Value);

impl Memory {
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(serde_json::Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.get("content").and_then(serde_json::Value::as_str)
    }

    pub fn metadata(&self) -> Option<&JsonMap> {
        self.get("metadata").and_then(serde_json::Value::as_object)
    }

    /// String entries of `tags`; empty when absent or not an array.
    pub fn tags(&self) -> Vec<&str> {
        self.get("tags")
            .and_then(serde_json::Value::as_array)
            .map(|tags| tags.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }

    /// First `max_chars` characters of the content, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let content = self.content().unwrap_or_default();
        match content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &content[..cut]),
            None => content.to_string(),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self(serde_json::Value::Object(JsonMap::new()))
    }
}

impl From<serde_json::Value> for Memory {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// One search hit, kept as sent; `memory` and `similarity_score` are read on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(serde_json::Value);

impl SearchResult {
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// The hit's `memory` object; an empty record when absent.
    pub fn memory(&self) -> Memory {
        self.0
            .get("memory")
            .cloned()
            .map(Memory::from_value)
            .unwrap_or_default()
    }

    pub fn similarity_score(&self) -> Option<f64> {
        self.0
            .get("similarity_score")
            .and_then(serde_json::Value::as_f64)
    }
}

/// Body of `POST /memories`. Metadata and tags are always sent, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewMemory {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Parameters of `GET /memories/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub limit: u32,
    /// Tag filter, sent comma-joined. `None` or empty omits the parameter.
    pub tags: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            tags: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Query-string pairs in wire order: `q`, `limit`, then `tags` if any.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.query.clone()), ("limit", self.limit.to_string())];
        if let Some(ref tags) = self.tags {
            if !tags.is_empty() {
                pairs.push(("tags", tags.join(",")));
            }
        }
        pairs
    }
}

/// Pagination for `GET /memories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: u32,
    pub limit: u32,
}

impl ListQuery {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIST_LIMIT)
    }
}

/// Response of `POST /memories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemoryResponse {
    pub id: String,
}

/// Response of `GET /memories/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Response of `GET /memories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMemoriesResponse {
    pub memories: Vec<Memory>,
}

/// Response of `DELETE /memories/{id}`. A missing `deleted` field reads as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteMemoryResponse {
    #[serde(default)]
    pub deleted: bool,
}
