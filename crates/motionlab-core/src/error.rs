// crates/motionlab-core/src/error.rs
//
// Local, user-recoverable input errors. These never reach the network layer;
// transport failures live in motionlab-net as `UploadError`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Display text is the exact banner shown under the file picker.
    #[error("Please select a valid video file")]
    NotAVideo { mime_type: String },

    #[error("Please select a video file!")]
    NoFileSelected,

    #[error("an upload is already in progress")]
    UploadInProgress,

    #[error("unknown parameter '{0}'")]
    UnknownField(String),

    #[error("'{raw}' is not a valid value for {field}")]
    Unparsable { field: String, raw: String },

    #[error("{field} expects a {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("'{0}' is not a <width>x<height> resolution")]
    BadResolution(String),
}
