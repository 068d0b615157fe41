mod app;
pub mod attachment;
pub mod channel;
pub mod components;
pub mod conversation;
pub mod navigation;
pub mod palette;
pub mod state;

pub use app::{ChatLabels, KnowledgeBaseApp};
