use std::fmt;

use async_trait::async_trait;

use super::types::Document;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Client misconfigured (bad base URL, unusable TLS setup).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON shape we expect.
    Decode(String),
    /// The local document could not be read.
    Io(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            BackendError::Decode(msg) => write!(f, "decode error: {msg}"),
            BackendError::Io(msg) => write!(f, "file error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Origin the backend is reached at, for display.
    fn base_url(&self) -> &str;

    /// Sends a document to `/upload`. Returns the backend's `message` field, if any.
    async fn upload(&self, document: Document) -> Result<Option<String>, BackendError>;

    /// Sends one question to `/chat` and returns the answer text.
    async fn chat(&self, message: &str) -> Result<String, BackendError>;

    /// Probes `/healthz`. Returns the reported status string.
    async fn health(&self) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_for_api_errors() {
        let err = BackendError::Api {
            status: 503,
            message: "warming up".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (HTTP 503): warming up");
    }

    #[test]
    fn test_display_prefixes_each_variant() {
        assert!(BackendError::Network("refused".into()).to_string().starts_with("network error"));
        assert!(BackendError::Decode("eof".into()).to_string().starts_with("decode error"));
        assert!(BackendError::Io("missing".into()).to_string().starts_with("file error"));
        assert!(BackendError::Config("bad url".into()).to_string().starts_with("config error"));
    }
}
