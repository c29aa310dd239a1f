// crates/motionlab-core/src/session.rs
//
// Upload session state machine, one per form.
//
//   Idle ──begin()──▶ Uploading { progress, status }
//                        │  on_sent / on_progress (non-decreasing)
//                        ├──succeed(msg)──▶ Succeeded { message }
//                        └──fail(msg)─────▶ Failed { message }
//
// Succeeded and Failed are idle states that still carry the last banner
// text; the next selection or upload moves on from them. Progress events
// that arrive outside Uploading are dropped, so nothing can move the bar
// after the terminal event.

use crate::helpers::units::percent;
use crate::upload_types::ResponseMode;

pub const STATUS_PREPARING: &str = "Preparing upload...";
pub const STATUS_PROCESSING_VIDEO: &str = "Processing video... This may take a few minutes.";
pub const STATUS_COMPUTING_SCALE: &str = "Computing scale...";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Uploading {
        /// Percent of the request body sent, `0..=100`.
        progress: u8,
        status:   String,
        mode:     ResponseMode,
    },
    Succeeded { message: String },
    Failed    { message: String },
}

impl SessionState {
    pub fn begin(&mut self, mode: ResponseMode) {
        *self = SessionState::Uploading {
            progress: 0,
            status:   STATUS_PREPARING.to_string(),
            mode,
        };
    }

    pub fn on_sent(&mut self) {
        if let SessionState::Uploading { progress, status, .. } = self {
            *status = format!("Uploading... {progress}%");
        }
    }

    /// Record upload progress. Ignored when the total is unknown, when not
    /// uploading, or when the new percentage would move the bar backwards.
    pub fn on_progress(&mut self, loaded: u64, total: Option<u64>) {
        let SessionState::Uploading { progress, status, mode } = self else {
            return;
        };
        let Some(pct) = total.and_then(|t| percent(loaded, t)) else {
            return;
        };
        if pct < *progress {
            return;
        }
        *progress = pct;
        *status = if pct >= 100 {
            match mode {
                ResponseMode::Blob => STATUS_PROCESSING_VIDEO.to_string(),
                ResponseMode::Json => STATUS_COMPUTING_SCALE.to_string(),
            }
        } else {
            format!("Uploading... {pct}%")
        };
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        *self = SessionState::Succeeded { message: message.into() };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = SessionState::Failed { message: message.into() };
    }

    /// Drop any banner and go back to plain idle.
    pub fn clear(&mut self) {
        if !self.is_uploading() {
            *self = SessionState::Idle;
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, SessionState::Uploading { .. })
    }

    /// Zero whenever no upload is in flight.
    pub fn progress(&self) -> u8 {
        match self {
            SessionState::Uploading { progress, .. } => *progress,
            _                                        => 0,
        }
    }

    pub fn status_message(&self) -> Option<&str> {
        match self {
            SessionState::Uploading { status, .. } => Some(status),
            _                                      => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Failed { message } => Some(message),
            _                                => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match self {
            SessionState::Succeeded { message } => Some(message),
            _                                   => None,
        }
    }
}
