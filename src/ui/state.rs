use crate::common::{Message, PendingAttachment, ServiceCommand, ServiceEvent};

use super::attachment::AttachmentControl;
use super::channel::MessageChannel;
use super::conversation::Conversation;
use super::navigation::Route;

/// Local UI state. Every mutation goes through here so the view stays a
/// projection of it.
#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    pub conversation: Conversation,
    pub channel: MessageChannel,
    pub attachment: AttachmentControl,
    /// Assistant text received so far for the reply in flight.
    pub streaming: Option<String>,
    pub assistant_error: Option<String>,
    /// Blocking notice shown after a failed upload.
    pub upload_error: Option<String>,
    pub scroll_to_bottom: bool,
}

impl AppState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            ..Self::default()
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            log::info!("Navigating to {}", route.path());
            self.route = route;
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.channel.is_enabled() || self.attachment.is_uploading()
    }

    pub fn submit_input(&mut self) -> Option<ServiceCommand> {
        let message = self.channel.submit_input()?;
        Some(self.accept(message))
    }

    pub fn select_file(&mut self, attachment: PendingAttachment) {
        if self.attachment.select(attachment) {
            log::info!(
                "Selected {} for upload",
                self.attachment.pending().map_or("", |file| file.file_name.as_str())
            );
        }
    }

    /// A file dropped on the window opens the assistant page with it
    /// selected, unless an upload is still running.
    pub fn drop_file(&mut self, attachment: PendingAttachment) {
        if self.attachment.is_uploading() {
            log::info!(
                "Ignoring dropped file {} while an upload is in progress",
                attachment.file_name
            );
            return;
        }
        self.navigate(Route::AskAi);
        self.select_file(attachment);
    }

    pub fn remove_file(&mut self) {
        self.attachment.remove();
    }

    pub fn confirm_upload(&mut self) -> Option<ServiceCommand> {
        self.attachment.confirm_upload().map(ServiceCommand::Upload)
    }

    pub fn dismiss_upload_error(&mut self) {
        self.upload_error = None;
    }

    /// Applies a worker event and returns the follow-up command it triggers.
    pub fn apply_event(&mut self, event: ServiceEvent) -> Option<ServiceCommand> {
        match event {
            ServiceEvent::AssistantDelta(text) => {
                self.streaming.get_or_insert_with(String::new).push_str(&text);
                self.scroll_to_bottom = true;
                None
            }
            ServiceEvent::AssistantFinished(reply) => {
                self.streaming = None;
                self.assistant_error = None;
                self.conversation.append(Message::assistant(reply));
                self.scroll_to_bottom = true;
                self.settle_reply()
            }
            ServiceEvent::AssistantFailed(error) => {
                self.streaming = None;
                self.assistant_error = Some(error);
                self.settle_reply()
            }
            ServiceEvent::UploadFinished(result) => {
                self.attachment.upload_succeeded();
                let message = self.channel.submit_or_defer(result.chat_text())?;
                Some(self.accept(message))
            }
            ServiceEvent::UploadFailed { file_name, error } => {
                self.attachment.upload_failed();
                self.upload_error = Some(format!(
                    "Upload of {file_name} failed. Please try again.\n\n{error}"
                ));
                None
            }
        }
    }

    fn settle_reply(&mut self) -> Option<ServiceCommand> {
        let message = self.channel.reply_settled()?;
        Some(self.accept(message))
    }

    fn accept(&mut self, message: Message) -> ServiceCommand {
        self.assistant_error = None;
        self.conversation.append(message);
        self.scroll_to_bottom = true;
        ServiceCommand::Ask {
            history: self.conversation.messages().to_vec(),
        }
    }
}
