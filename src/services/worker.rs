use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;

use crate::common::{Message, PendingAttachment, ServiceCommand, ServiceEvent, UploadResult};
use crate::error::{AssistantError, UploadError};

use super::assistant::Assistant;
use super::object_store::{ObjectStore, UploadRequest};

/// Background task that runs every hosted-service call on behalf of the UI.
pub struct ServiceWorker {
    assistant: Arc<dyn Assistant>,
    store: Arc<dyn ObjectStore>,
    event_sender: mpsc::Sender<ServiceEvent>,
    command_receiver: mpsc::Receiver<ServiceCommand>,
}

impl ServiceWorker {
    pub fn new(
        assistant: Arc<dyn Assistant>,
        store: Arc<dyn ObjectStore>,
        event_sender: mpsc::Sender<ServiceEvent>,
        command_receiver: mpsc::Receiver<ServiceCommand>,
    ) -> Self {
        Self {
            assistant,
            store,
            event_sender,
            command_receiver,
        }
    }

    /// Runs until the UI drops its command sender. Each command gets its own
    /// task so an upload does not wait behind a streaming reply.
    pub async fn run(mut self) {
        log::info!("Service worker started");

        while let Some(command) = self.command_receiver.recv().await {
            match command {
                ServiceCommand::Ask { history } => {
                    let assistant = Arc::clone(&self.assistant);
                    let events = self.event_sender.clone();
                    tokio::spawn(ask(assistant, history, events));
                }
                ServiceCommand::Upload(attachment) => {
                    let store = Arc::clone(&self.store);
                    let events = self.event_sender.clone();
                    tokio::spawn(upload(store, attachment, events));
                }
            }
        }

        log::info!("Command channel closed; service worker stopping");
    }
}

async fn ask(
    assistant: Arc<dyn Assistant>,
    history: Vec<Message>,
    events: mpsc::Sender<ServiceEvent>,
) {
    let event = match stream_reply(assistant.as_ref(), history, &events).await {
        Ok(reply) => ServiceEvent::AssistantFinished(reply),
        Err(err) => {
            log::warn!("Assistant request failed: {err}");
            ServiceEvent::AssistantFailed(err.to_string())
        }
    };
    notify(&events, event).await;
}

async fn stream_reply(
    assistant: &dyn Assistant,
    history: Vec<Message>,
    events: &mpsc::Sender<ServiceEvent>,
) -> Result<String, AssistantError> {
    let mut parts = assistant.reply(history).await?;
    let mut reply = String::new();

    while let Some(part) = parts.next().await {
        let part = part?;
        reply.push_str(&part);
        notify(events, ServiceEvent::AssistantDelta(part)).await;
    }

    if reply.trim().is_empty() {
        return Err(AssistantError::EmptyReply);
    }
    Ok(reply)
}

async fn upload(
    store: Arc<dyn ObjectStore>,
    attachment: PendingAttachment,
    events: mpsc::Sender<ServiceEvent>,
) {
    let file_name = attachment.file_name.clone();
    let event = match upload_attachment(store.as_ref(), attachment).await {
        Ok(result) => {
            log::info!("Uploaded {} to {}", result.file_name, result.location);
            ServiceEvent::UploadFinished(result)
        }
        Err(err) => {
            log::warn!("Upload of {file_name} failed: {err}");
            ServiceEvent::UploadFailed {
                file_name,
                error: err.to_string(),
            }
        }
    };
    notify(&events, event).await;
}

async fn upload_attachment(
    store: &dyn ObjectStore,
    attachment: PendingAttachment,
) -> Result<UploadResult, UploadError> {
    let body = tokio::fs::read(&attachment.path)
        .await
        .map_err(|source| UploadError::ReadFile {
            path: attachment.path.clone(),
            source,
        })?;

    let location = store
        .upload(UploadRequest::new(attachment.file_name.clone(), body))
        .await?;

    Ok(UploadResult {
        location,
        file_name: attachment.file_name,
    })
}

async fn notify(events: &mpsc::Sender<ServiceEvent>, event: ServiceEvent) {
    if let Err(err) = events.send(event).await {
        log::warn!("Failed to notify UI: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures::stream;

    use super::*;
    use crate::services::assistant::ReplyStream;

    struct ScriptedAssistant {
        parts: Vec<&'static str>,
        seen: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl Assistant for ScriptedAssistant {
        async fn reply(&self, history: Vec<Message>) -> Result<ReplyStream, AssistantError> {
            self.seen.lock().unwrap().push(history.len());
            let parts: Vec<Result<String, AssistantError>> =
                self.parts.iter().map(|p| Ok(p.to_string())).collect();
            Ok(stream::iter(parts).boxed())
        }
    }

    struct MemoryStore {
        fail: bool,
        uploads: Mutex<Vec<UploadRequest>>,
    }

    impl MemoryStore {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                uploads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn upload(&self, request: UploadRequest) -> Result<String, UploadError> {
            if self.fail {
                return Err(UploadError::Provider {
                    message: "quota exceeded".into(),
                    source: "quota exceeded".into(),
                });
            }
            let location = format!("https://files.example/uploads/{}", request.file_name);
            self.uploads.lock().unwrap().push(request);
            Ok(location)
        }
    }

    fn spawn_worker(
        assistant: Arc<dyn Assistant>,
        store: Arc<dyn ObjectStore>,
    ) -> (mpsc::Sender<ServiceCommand>, mpsc::Receiver<ServiceEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        tokio::spawn(ServiceWorker::new(assistant, store, event_tx, cmd_rx).run());
        (cmd_tx, event_rx)
    }

    #[tokio::test]
    async fn ask_streams_deltas_then_finishes() {
        let assistant = Arc::new(ScriptedAssistant {
            parts: vec!["Hello", ", how can I help?"],
            seen: Mutex::new(Vec::new()),
        });
        let (commands, mut events) =
            spawn_worker(assistant.clone(), Arc::new(MemoryStore::new(false)));

        commands
            .send(ServiceCommand::Ask {
                history: vec![Message::user("Hi")],
            })
            .await
            .unwrap();

        assert!(matches!(events.recv().await, Some(ServiceEvent::AssistantDelta(p)) if p == "Hello"));
        assert!(matches!(events.recv().await, Some(ServiceEvent::AssistantDelta(_))));
        assert!(matches!(
            events.recv().await,
            Some(ServiceEvent::AssistantFinished(reply)) if reply == "Hello, how can I help?"
        ));
        assert_eq!(*assistant.seen.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn blank_reply_is_reported_as_failure() {
        let assistant = Arc::new(ScriptedAssistant {
            parts: vec!["  "],
            seen: Mutex::new(Vec::new()),
        });
        let (commands, mut events) = spawn_worker(assistant, Arc::new(MemoryStore::new(false)));

        commands
            .send(ServiceCommand::Ask {
                history: vec![Message::user("Hi")],
            })
            .await
            .unwrap();

        assert!(matches!(events.recv().await, Some(ServiceEvent::AssistantDelta(_))));
        assert!(matches!(events.recv().await, Some(ServiceEvent::AssistantFailed(_))));
    }

    #[tokio::test]
    async fn upload_reads_file_and_reports_location() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.7").unwrap();
        let attachment = PendingAttachment::from_path(file.path());
        let expected_name = attachment.file_name.clone();

        let store = Arc::new(MemoryStore::new(false));
        let assistant = Arc::new(ScriptedAssistant {
            parts: Vec::new(),
            seen: Mutex::new(Vec::new()),
        });
        let (commands, mut events) = spawn_worker(assistant, store.clone());

        commands
            .send(ServiceCommand::Upload(attachment))
            .await
            .unwrap();

        match events.recv().await {
            Some(ServiceEvent::UploadFinished(result)) => {
                assert_eq!(result.file_name, expected_name);
                assert!(result.location.ends_with(&expected_name));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].body, b"%PDF-1.7");
        assert_eq!(uploads[0].content_type, "application/pdf");
    }

    #[tokio::test]
    async fn provider_failure_is_reported_with_file_name() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let attachment = PendingAttachment::from_path(file.path());
        let assistant = Arc::new(ScriptedAssistant {
            parts: Vec::new(),
            seen: Mutex::new(Vec::new()),
        });
        let (commands, mut events) = spawn_worker(assistant, Arc::new(MemoryStore::new(true)));

        commands
            .send(ServiceCommand::Upload(attachment.clone()))
            .await
            .unwrap();

        match events.recv().await {
            Some(ServiceEvent::UploadFailed { file_name, error }) => {
                assert_eq!(file_name, attachment.file_name);
                assert!(error.contains("quota exceeded"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_file_fails_without_touching_the_store() {
        let store = Arc::new(MemoryStore::new(false));
        let attachment = PendingAttachment::from_path("/definitely/not/here/report.pdf");

        let err = upload_attachment(store.as_ref(), attachment)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::ReadFile { .. }));
        assert!(store.uploads.lock().unwrap().is_empty());
    }
}
