mod common;
mod config;
mod error;
mod services;
mod ui;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use services::{OpenAiAssistant, S3ObjectStore, ServiceWorker};
use tokio::sync::mpsc;
use ui::navigation::Route;
use ui::{ChatLabels, KnowledgeBaseApp};

#[derive(Parser)]
#[command(
    name = "knowledge_base_desktop",
    version,
    about = "Knowledge base desktop client with an AI assistant"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Page to open on start (/dashboard or /ask-ai)
    #[arg(long, default_value = "/dashboard", value_name = "PATH")]
    route: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let initial_route = Route::resolve(&cli.route);
    let labels = ChatLabels::from(&app_config.assistant);

    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let assistant = Arc::new(OpenAiAssistant::new(app_config.assistant));
    let store = Arc::new(S3ObjectStore::new(app_config.storage));
    tokio::spawn(ServiceWorker::new(assistant, store, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Knowledge Base",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("KnowledgeBaseApp should only be initialized once");

            log::info!("Client started on {}", initial_route.path());

            Ok(Box::new(KnowledgeBaseApp::new(
                cc,
                initial_route,
                labels.clone(),
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}
