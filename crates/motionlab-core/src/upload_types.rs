// crates/motionlab-core/src/upload_types.rs
//
// Types that flow across the channel between motionlab-net and motionlab-ui.
// No egui, no ureq. Plain data only.

use std::path::PathBuf;

use uuid::Uuid;

/// Which form a request belongs to. Each form posts to its own endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Scale calibration → `/find-scale`, JSON reply.
    Scaling,
    /// Motion quantification → `/motion-analysis`, video reply.
    Motion,
    /// Legacy quick upload → `/upload`, video reply.
    Legacy,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Scaling, FormKind::Motion, FormKind::Legacy];

    pub fn response_mode(self) -> ResponseMode {
        match self {
            FormKind::Scaling => ResponseMode::Json,
            FormKind::Motion | FormKind::Legacy => ResponseMode::Blob,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormKind::Scaling => "Find Scaling",
            FormKind::Motion  => "Quantify Motion",
            FormKind::Legacy  => "Quick Upload",
        }
    }
}

/// How the service reply body is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseMode {
    /// `{ "result": number }`
    Json,
    /// Encoded video to be saved for the user.
    Blob,
}

/// One flat multipart text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name:  String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Everything the worker needs to issue one POST.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub job_id:        Uuid,
    pub form:          FormKind,
    pub file_path:     PathBuf,
    pub file_name:     String,
    pub mime_type:     String,
    /// Text fields, in send order, after the `video` file part.
    pub fields:        Vec<FormField>,
    pub response_mode: ResponseMode,
}

/// Decoded successful reply.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadResponse {
    Scale(f64),
    /// Video written to a temporary file; the UI moves it to its final place.
    Video { path: PathBuf },
}

/// Lifecycle events for one upload, in order:
/// `Sent` → zero or more `Progress` → exactly one of `Completed` / `Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent {
    Sent      { job_id: Uuid },
    /// `total` is `None` when the body size is unknown; no percentage then.
    Progress  { job_id: Uuid, loaded: u64, total: Option<u64> },
    Completed { job_id: Uuid, response: UploadResponse },
    /// `message` is already the user-facing text.
    Failed    { job_id: Uuid, message: String },
}

impl UploadEvent {
    pub fn job_id(&self) -> Uuid {
        match self {
            UploadEvent::Sent { job_id }
            | UploadEvent::Progress { job_id, .. }
            | UploadEvent::Completed { job_id, .. }
            | UploadEvent::Failed { job_id, .. } => *job_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadEvent::Completed { .. } | UploadEvent::Failed { .. })
    }
}
