pub mod assistant;
pub mod object_store;
pub mod s3;
pub mod worker;

pub use assistant::OpenAiAssistant;
pub use s3::S3ObjectStore;
pub use worker::ServiceWorker;
