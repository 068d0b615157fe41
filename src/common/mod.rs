pub mod commands;
pub mod events;
pub mod types;

pub use commands::ServiceCommand;
pub use events::ServiceEvent;
pub use types::{Message, PendingAttachment, Role, UploadResult};
