//! reqwest implementation of [`Backend`].
//!
//! Every request is attempted once. There is no retry; a timeout only
//! applies when one is configured.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};

use super::types::{ChatRequest, ChatResponse, Document, HealthResponse, upload_message};
use super::{Backend, BackendError};

/// Default origin of the FarmCopilot API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Multipart field the backend reads the document from
const UPLOAD_FIELD: &str = "file";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::Config("backend URL is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turns a non-2xx response into `BackendError::Api`, keeping the body as the message.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    debug!("Backend response status: {status}");
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Backend API error: {} - {}", status.as_u16(), message);
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Reads the full body, then decodes it, so transport and shape failures stay distinct.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| {
        debug!("Undecodable body ({} bytes): {}", body.len(), body);
        BackendError::Decode(e.to_string())
    })
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload(&self, document: Document) -> Result<Option<String>, BackendError> {
        info!(
            "Uploading {} ({} bytes) to {}",
            document.file_name,
            document.bytes.len(),
            self.endpoint("upload")
        );

        let part = Part::bytes(document.bytes)
            .file_name(document.file_name)
            .mime_str("application/pdf")
            .map_err(|e| BackendError::Config(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        // A rejection that still explains itself in JSON is reported like a success
        let status = response.status();
        if !status.is_success() {
            warn!("Upload answered HTTP {}, reading body anyway", status.as_u16());
        }
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Ok(upload_message(&value)),
            Err(_) if !status.is_success() => Err(BackendError::Api {
                status: status.as_u16(),
                message: body,
            }),
            Err(e) => {
                debug!("Undecodable upload body ({} bytes): {}", body.len(), body);
                Err(BackendError::Decode(e.to_string()))
            }
        }
    }

    async fn chat(&self, message: &str) -> Result<String, BackendError> {
        info!("Chat request: {} chars to {}", message.len(), self.endpoint("chat"));

        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;
        let reply: ChatResponse = read_json(response).await?;
        debug!("Chat reply: {} chars", reply.response.len());
        Ok(reply.response)
    }

    async fn health(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .get(self.endpoint("healthz"))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;
        let health: HealthResponse = read_json(response).await?;
        Ok(health.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.endpoint("chat"), "http://localhost:8000/chat");
    }

    #[test]
    fn test_empty_url_is_config_error() {
        assert!(matches!(
            HttpBackend::new("", None),
            Err(BackendError::Config(_))
        ));
    }
}
