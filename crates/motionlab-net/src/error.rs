// crates/motionlab-net/src/error.rs
//
// Transport-side failures. Only a structured `{ "error": "..." }` body from
// the service is shown to the user verbatim; everything else is logged in
// full and displayed as the generic message.

use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred during processing";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("service returned HTTP {status}: {}", message.as_deref().unwrap_or("<no error field>"))]
    Server { status: u16, message: Option<String> },

    #[error("HTTP transport failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("malformed service response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Text for the form's error banner.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Server { message: Some(m), .. } => m.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
