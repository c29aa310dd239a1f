// crates/motionlab-core/src/lib.rs
//
// Pure form data for the MotionLab client. No egui, no HTTP.
//
// Everything the UI shows and the worker sends is derived from the types in
// this crate. State transitions are plain functions on plain structs so they
// can be tested without a window or a server.

pub mod commands;
pub mod error;
pub mod file;
pub mod form;
pub mod helpers;
pub mod params;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;
pub mod upload_types;

pub use error::ValidationError;
pub use form::{FormOutcome, UploadForm};
pub use params::{
    LegacyParameters, ParamValue, ParameterRecord, ProcessAlgo, ProcessingParameters,
    Resolution, ResolutionSlot, VideoParams,
};
pub use session::SessionState;
pub use store::ParameterStore;
pub use sync::{reconcile, ScaleResult, SyncInputs};
pub use upload_types::{FormField, FormKind, ResponseMode, UploadEvent, UploadRequest, UploadResponse};
