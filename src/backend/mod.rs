//! # Backend
//!
//! Everything that talks to the FarmCopilot HTTP service lives here.
//! The rest of the crate only sees the [`Backend`] trait, so the event loop
//! can be driven by a scripted backend in tests.

pub mod client;
pub mod http;
pub mod types;

pub use client::{Backend, BackendError};
pub use http::HttpBackend;
pub use types::{ChatRequest, ChatResponse, Document, HealthResponse, upload_message};
