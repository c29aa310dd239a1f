// crates/motionlab-net/src/lib.rs
//
// No egui dependency. Communicates with motionlab-ui via channels only.
//
// To add a new service endpoint:
//   1. Add a FormKind variant in motionlab-core
//   2. Give it a path in config::Endpoints
//   3. Teach client.rs how to read its reply

pub mod client;
pub mod config;
pub mod error;
pub mod multipart;
pub mod progress;
pub mod worker;

// Re-export the main public API so motionlab-ui imports are simple.
pub use client::UploadClient;
pub use config::ServiceConfig;
pub use error::{UploadError, GENERIC_ERROR_MESSAGE};
pub use worker::UploadWorker;
pub use motionlab_core::upload_types::{UploadEvent, UploadRequest, UploadResponse};
