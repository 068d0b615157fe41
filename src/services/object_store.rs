use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::UploadError;

/// Payload for a single object-store write.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, body: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            content_type,
            body,
        }
    }
}

/// Blob store that accepts one file and answers with a resolvable location.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<String, UploadError>;
}

/// Key under which an upload is written: `uploads/<millis>-<file name>`.
pub fn storage_key(file_name: &str, uploaded_at: DateTime<Utc>) -> String {
    format!("uploads/{}-{}", uploaded_at.timestamp_millis(), file_name)
}

pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn key_is_prefixed_with_upload_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            storage_key("report.pdf", at),
            "uploads/1700000000123-report.pdf"
        );
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        let request = UploadRequest::new("report.pdf", vec![1, 2, 3]);
        assert_eq!(request.content_type, "application/pdf");
        assert_eq!(content_type_for("notes"), "application/octet-stream");
    }
}
