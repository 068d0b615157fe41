use std::time::Duration;

use eframe::egui::{self, RichText};
use tokio::sync::mpsc;

use crate::common::{PendingAttachment, ServiceCommand, ServiceEvent};
use crate::config::AssistantConfig;

use super::components::attachment_bar::{self, AttachmentAction};
use super::components::{chat_area, dashboard, input_bar, sidebar};
use super::conversation::conversation_view;
use super::navigation::Route;
use super::palette;
use super::state::AppState;

/// Height reserved under the transcript for the attachment row and composer.
const COMPOSER_HEIGHT: f32 = 150.0;

/// Text the assistant panel shows around the conversation.
#[derive(Debug, Clone)]
pub struct ChatLabels {
    pub title: String,
    pub greeting: String,
}

impl From<&AssistantConfig> for ChatLabels {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            title: config.title.clone(),
            greeting: config.greeting.clone(),
        }
    }
}

pub struct KnowledgeBaseApp {
    state: AppState,
    labels: ChatLabels,
    command_sender: mpsc::Sender<ServiceCommand>,
    event_receiver: mpsc::Receiver<ServiceEvent>,
}

impl KnowledgeBaseApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_route: Route,
        labels: ChatLabels,
        command_sender: mpsc::Sender<ServiceCommand>,
        event_receiver: mpsc::Receiver<ServiceEvent>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            state: AppState::new(initial_route),
            labels,
            command_sender,
            event_receiver,
        }
    }

    fn handle_service_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Some(command) = self.state.apply_event(event) {
                self.send_command(command);
            }
        }
    }

    /// Forwards a command to the worker. If the worker is gone the matching
    /// failure is fed back into the state so no control stays locked.
    fn send_command(&mut self, command: ServiceCommand) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let Err(err) = self.command_sender.try_send(command) else {
                continue;
            };
            log::warn!("Failed to send command to service worker: {err}");
            let fallback = match err.into_inner() {
                ServiceCommand::Ask { .. } => {
                    ServiceEvent::AssistantFailed("assistant service is unavailable".to_string())
                }
                ServiceCommand::Upload(attachment) => ServiceEvent::UploadFailed {
                    file_name: attachment.file_name,
                    error: "upload service is unavailable".to_string(),
                },
            };
            next = self.state.apply_event(fallback);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.state.drop_file(PendingAttachment::from_path(path));
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new().set_title("Attach File").pick_file() {
            self.state.select_file(PendingAttachment::from_path(path));
        }
    }

    fn render_ask_ai(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Ask AI")
                .size(24.0)
                .strong()
                .color(palette::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new("Chat with your knowledge base assistant")
                .size(13.0)
                .color(palette::TEXT_MUTED),
        );
        ui.separator();
        ui.label(
            RichText::new(&self.labels.title)
                .size(15.0)
                .strong()
                .color(palette::TEXT_SECONDARY),
        );
        ui.add_space(4.0);

        let scroll_to_bottom = std::mem::take(&mut self.state.scroll_to_bottom);
        let transcript_height = (ui.available_height() - COMPOSER_HEIGHT).max(120.0);
        let view = conversation_view(self.state.conversation.messages());
        chat_area::render(
            ui,
            &view,
            self.state.streaming.as_deref(),
            &self.labels.greeting,
            scroll_to_bottom,
            transcript_height,
        );

        if let Some(error) = &self.state.assistant_error {
            ui.colored_label(palette::DANGER, format!("Assistant error: {error}"));
        }
        ui.separator();

        let attachment_action = attachment_bar::render(ui, &self.state.attachment);
        ui.add_space(6.0);
        let send = input_bar::render(ui, &mut self.state.channel);

        match attachment_action {
            Some(AttachmentAction::Pick) => self.pick_file(),
            Some(AttachmentAction::Remove) => self.state.remove_file(),
            Some(AttachmentAction::Upload) => {
                if let Some(command) = self.state.confirm_upload() {
                    self.send_command(command);
                }
            }
            None => {}
        }

        if send {
            if let Some(command) = self.state.submit_input() {
                self.send_command(command);
            }
        }
    }

    fn render_upload_error(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.upload_error.clone() else {
            return;
        };

        let response = egui::Modal::new(egui::Id::new("upload_error")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading("Upload failed");
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(12.0);
            ui.button("OK").clicked()
        });

        if response.inner || response.should_close() {
            self.state.dismiss_upload_error();
        }
    }
}

impl eframe::App for KnowledgeBaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_service_events();
        self.handle_dropped_files(ctx);

        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(256.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(palette::SURFACE_MUTED))
            .show(ctx, |ui| {
                if let Some(route) = sidebar::render(ui, self.state.route) {
                    self.state.navigate(route);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.route {
            Route::Dashboard => dashboard::render(ui),
            Route::AskAi => self.render_ask_ai(ui),
        });

        self.render_upload_error(ctx);

        // Worker events do not wake the UI on their own.
        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
