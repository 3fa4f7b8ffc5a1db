//! Wire types for the FarmCopilot backend.
//!
//! `/chat` is strict: a reply without `response` is a decode error.
//! `/upload` is lenient: any JSON body is accepted and `message` is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BackendError;

/// The request body for `POST /chat`
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// The reply body for `POST /chat`
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

/// The reply body for `GET /healthz`
#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

/// Pulls the optional `message` out of an upload reply.
///
/// Any truthy value counts: strings as they are, other values as their JSON
/// text. `null`, `false`, `0`, `""` and a missing field count as absent.
pub fn upload_message(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v == 0.0) => None,
        other => Some(other.to_string()),
    }
}

/// A document read from disk, ready to be sent as the `file` part.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub async fn read(path: &Path) -> Result<Self, BackendError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BackendError::Io(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Advisory only: callers warn on a mismatch but still upload.
    pub fn looks_like_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}
