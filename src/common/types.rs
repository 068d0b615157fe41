use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single entry of the conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// File picked by the user and waiting for an explicit upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub path: PathBuf,
    pub file_name: String,
}

impl PendingAttachment {
    /// Builds an attachment from a local path, falling back to the whole
    /// path as display name when it has no file component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }
}

/// Location returned by the object store for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub location: String,
    pub file_name: String,
}

impl UploadResult {
    /// Chat text announcing the uploaded file to the assistant.
    pub fn chat_text(&self) -> String {
        format!(
            "I've uploaded a file: {}\nURL: {}",
            self.file_name, self.location
        )
    }
}
