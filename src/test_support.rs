//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{Backend, BackendError, Document};
use crate::core::state::App;

/// A backend that answers from canned results and records what it was sent.
pub struct ScriptedBackend {
    pub chat_reply: Result<String, BackendError>,
    pub upload_reply: Result<Option<String>, BackendError>,
    pub health_reply: Result<String, BackendError>,
    pub chat_log: Mutex<Vec<String>>,
    pub upload_log: Mutex<Vec<Document>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            chat_reply: Ok("ok".to_string()),
            upload_reply: Ok(None),
            health_reply: Ok("ok".to_string()),
            chat_log: Mutex::new(Vec::new()),
            upload_log: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn base_url(&self) -> &str {
        "http://scripted.test"
    }

    async fn upload(&self, document: Document) -> Result<Option<String>, BackendError> {
        if let Ok(mut log) = self.upload_log.lock() {
            log.push(document);
        }
        self.upload_reply.clone()
    }

    async fn chat(&self, message: &str) -> Result<String, BackendError> {
        if let Ok(mut log) = self.chat_log.lock() {
            log.push(message.to_string());
        }
        self.chat_reply.clone()
    }

    async fn health(&self) -> Result<String, BackendError> {
        self.health_reply.clone()
    }
}

/// Creates a test App with a default ScriptedBackend and a one-line greeting.
pub fn test_app() -> App {
    App::new(Arc::new(ScriptedBackend::default()), Some("Hello!"))
}
