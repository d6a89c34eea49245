//! Connection settings shared by the async and blocking clients.

use std::fmt;

/// Environment variable holding the canister base URL.
pub const ENV_BASE_URL: &str = "OPENMEMORY_URL";
/// Environment variable holding the optional bearer token.
pub const ENV_TOKEN: &str = "OPENMEMORY_TOKEN";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Base URL (trailing slashes removed) and optional bearer token. Immutable once built.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var(ENV_TOKEN).ok();
        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Absolute URL for an API path such as `/memories`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// API path for one memory; the id is encoded as a single segment.
    pub(crate) fn memory_path(id: &str) -> String {
        format!("/memories/{}", urlencoding::encode(id))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let a = ClientConfig::new("https://x/", None);
        let b = ClientConfig::new("https://x", None);
        assert_eq!(a.base_url(), "https://x");
        assert_eq!(a.url("/memories"), b.url("/memories"));
        assert_eq!(ClientConfig::new("https://x//", None).base_url(), "https://x");
    }

    #[test]
    fn empty_token_means_no_auth() {
        assert_eq!(ClientConfig::new("https://x", Some(String::new())).token(), None);
        assert_eq!(
            ClientConfig::new("https://x", Some("t".into())).token(),
            Some("t")
        );
    }

    #[test]
    fn memory_ids_are_one_path_segment() {
        assert_eq!(ClientConfig::memory_path("abc-123"), "/memories/abc-123");
        assert_eq!(ClientConfig::memory_path("a/b c"), "/memories/a%2Fb%20c");
    }

    #[test]
    fn debug_hides_token() {
        let cfg = ClientConfig::new("https://x", Some("secret".into()));
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
