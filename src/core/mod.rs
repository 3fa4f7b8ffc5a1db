//! # Core Application Logic
//!
//! FarmCopilot's business logic. It knows nothing about the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!              ┌─────────────────┴─────────────────┐
//!              ▼                                   ▼
//!       ┌────────────┐                      ┌────────────┐
//!       │    TUI     │ ── spawns tasks ───▶ │  Backend   │
//!       │ (ratatui)  │ ◀── Action channel ─ │  (reqwest) │
//!       └────────────┘                      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: The append-only message history
//! - [`config`]: Config file loading and override resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod state;
