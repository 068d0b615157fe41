use super::types::UploadResult;

/// Events the service worker reports back to the UI.
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    AssistantDelta(String),
    AssistantFinished(String),
    AssistantFailed(String),
    UploadFinished(UploadResult),
    UploadFailed { file_name: String, error: String },
}
