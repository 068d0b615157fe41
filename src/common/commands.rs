use super::types::{Message, PendingAttachment};

/// Requests the UI hands to the service worker.
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    /// Ask the hosted assistant to answer the conversation so far.
    Ask { history: Vec<Message> },
    /// Push the attached file to the object store.
    Upload(PendingAttachment),
}
