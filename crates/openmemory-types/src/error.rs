//! Client error type.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The canister answered with a non-2xx status.
    #[error("request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx response whose body is not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status for `RequestFailed`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable server message: the `error` or `message` field of a JSON
    /// error body, else the raw body. `None` unless `RequestFailed`.
    pub fn server_message(&self) -> Option<String> {
        let ClientError::RequestFailed { body, .. } = self else {
            return None;
        };
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error", "message"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(String::from))
            });
        Some(from_json.unwrap_or_else(|| body.clone()))
    }
}
