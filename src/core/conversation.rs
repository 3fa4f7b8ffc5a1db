use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Message history for one session. Append-only: entries are never edited or
/// removed, and insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation with an assistant greeting, if one is given.
    pub fn with_greeting(greeting: Option<&str>) -> Self {
        let mut conversation = Self::default();
        if let Some(text) = greeting.filter(|t| !t.trim().is_empty()) {
            conversation.push_assistant(text.to_string());
        }
        conversation
    }

    pub fn push_user(&mut self, content: String) -> &Message {
        self.push(Role::User, content)
    }

    pub fn push_assistant(&mut self, content: String) -> &Message {
        self.push(Role::Assistant, content)
    }

    fn push(&mut self, role: Role, content: String) -> &Message {
        self.messages.push(Message { role, content });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
