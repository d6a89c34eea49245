//! Status check and JSON decoding shared by both clients.

use openmemory_types::ClientError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub(crate) fn transport_error(method: &str, path: &str, e: reqwest::Error) -> ClientError {
    let error_kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_request() {
        "request"
    } else {
        "unknown"
    };
    tracing::error!(
        method,
        path,
        error = %e,
        error_kind,
        "openmemory request failed"
    );
    ClientError::Transport(format!("{error_kind} error: {e}"))
}

/// Non-2xx becomes `RequestFailed` with the body verbatim; otherwise decode `T`.
pub(crate) fn decode<T: DeserializeOwned>(
    method: &str,
    path: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ClientError> {
    if !status.is_success() {
        tracing::warn!(
            method,
            path,
            status = status.as_u16(),
            body,
            "openmemory API returned error status"
        );
        return Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    tracing::debug!(method, path, status = status.as_u16(), "openmemory response");
    serde_json::from_str(body).map_err(|e| ClientError::Decode(format!("{method} {path}: {e}")))
}
