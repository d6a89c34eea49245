//! Synchronous client: every call blocks the calling thread until the response arrives.
//!
//! Must not be used from inside an async runtime; use [`crate::MemoryClient`] there.

use crate::config::ClientConfig;
use crate::response::{decode, transport_error};
use openmemory_types::{
    AddMemoryResponse, ClientError, DeleteMemoryResponse, JsonMap, ListMemoriesResponse,
    ListQuery, Memory, NewMemory, SearchQuery, SearchResponse, SearchResult,
};
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Blocking counterpart of [`crate::MemoryClient`] with the same operations.
#[derive(Debug, Clone)]
pub struct MemoryClient {
    client: reqwest::blocking::Client,
    config: ClientConfig,
}

impl MemoryClient {
    pub fn new(base_url: impl AsRef<str>, token: Option<String>) -> Self {
        Self::from_config(ClientConfig::new(base_url, token))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn with_http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&'static str, String)]>,
        body: Option<&NewMemory>,
    ) -> Result<T, ClientError> {
        let mut req = self.client.request(method.clone(), self.config.url(path));
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(token) = self.config.token() {
            req = req.bearer_auth(token);
        }
        tracing::debug!(method = %method, path, "openmemory request");
        let res = req
            .send()
            .map_err(|e| transport_error(method.as_str(), path, e))?;
        let status = res.status();
        let text = res
            .text()
            .map_err(|e| transport_error(method.as_str(), path, e))?;
        decode(method.as_str(), path, status, &text)
    }

    pub fn add_memory(&self, memory: &NewMemory) -> Result<String, ClientError> {
        let res: AddMemoryResponse =
            self.request(Method::POST, "/memories", None, Some(memory))?;
        Ok(res.id)
    }

    pub fn search_memories(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        let pairs = query.query_pairs();
        let res: SearchResponse =
            self.request(Method::GET, "/memories/search", Some(pairs.as_slice()), None)?;
        Ok(res.results)
    }

    pub fn get_memory(&self, id: &str) -> Result<Memory, ClientError> {
        self.request(Method::GET, &ClientConfig::memory_path(id), None, None)
    }

    pub fn delete_memory(&self, id: &str) -> Result<bool, ClientError> {
        let res: DeleteMemoryResponse =
            self.request(Method::DELETE, &ClientConfig::memory_path(id), None, None)?;
        Ok(res.deleted)
    }

    pub fn list_memories(&self, query: &ListQuery) -> Result<Vec<Memory>, ClientError> {
        let pairs = query.query_pairs();
        let res: ListMemoriesResponse =
            self.request(Method::GET, "/memories", Some(pairs.as_slice()), None)?;
        Ok(res.memories)
    }

    pub fn health_check(&self) -> Result<JsonMap, ClientError> {
        self.request(Method::GET, "/health", None, None)
    }

    pub fn get_stats(&self) -> Result<JsonMap, ClientError> {
        self.request(Method::GET, "/stats", None, None)
    }
}
