//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: application name, backend origin and health, status message
//! - `UploadPanel`: status of the latest upload plus the Ctrl+U hint
//! - `MessageBubble`: one conversation entry
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: composition buffer with the submit control
//! - `MessageList`: scrollable conversation view with layout caching
//! - `FilePrompt`: overlay for entering the path of a PDF
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── upload_panel.rs
//! ├── file_prompt.rs
//! ├── message.rs
//! ├── message_list.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod file_prompt;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod upload_panel;

pub use file_prompt::{FilePrompt, FilePromptEvent, FilePromptState};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use upload_panel::UploadPanel;
