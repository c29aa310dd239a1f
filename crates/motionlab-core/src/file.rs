// crates/motionlab-core/src/file.rs
//
// File selection and validation.
//
// A file is accepted when its MIME type starts with `video/`. The MIME type
// is derived from the extension only; the content is never inspected, so a
// mislabeled file can pass and a real video with an odd extension is
// rejected. Keep it that way; the service does the real decoding.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;

/// A user-picked file before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct FileCandidate {
    pub path:      PathBuf,
    pub name:      String,
    pub mime_type: String,
    pub size:      u64,
}

impl FileCandidate {
    /// Build a candidate from a path on disk (name, size, MIME type).
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mime_type = mime_for_path(&path).to_string();
        Ok(Self { path, name, mime_type, size })
    }
}

/// MIME type by extension, `application/octet-stream` when unknown.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path.extension()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase();

    match ext.as_str() {
        "mp4"          => "video/mp4",
        "m4v"          => "video/x-m4v",
        "mov"          => "video/quicktime",
        "avi"          => "video/x-msvideo",
        "mkv"          => "video/x-matroska",
        "webm"         => "video/webm",
        "mpg" | "mpeg" => "video/mpeg",
        "wmv"          => "video/x-ms-wmv",
        "flv"          => "video/x-flv",
        "3gp"          => "video/3gpp",
        "ogv"          => "video/ogg",
        "mp3"          => "audio/mpeg",
        "wav"          => "audio/wav",
        "png"          => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt"          => "text/plain",
        "json"         => "application/json",
        _              => "application/octet-stream",
    }
}

/// Extensions offered by the file picker filter.
pub const VIDEO_EXTENSIONS: &[&str] =
    &["mp4", "m4v", "mov", "avi", "mkv", "webm", "mpg", "mpeg", "wmv", "flv", "3gp", "ogv"];

/// A validated video file.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub path:      PathBuf,
    pub name:      String,
    pub mime_type: String,
    pub size:      u64,
}

impl SelectedFile {
    pub fn validate(candidate: FileCandidate) -> Result<Self, ValidationError> {
        if !candidate.mime_type.starts_with("video/") {
            return Err(ValidationError::NotAVideo { mime_type: candidate.mime_type });
        }
        let FileCandidate { path, name, mime_type, size } = candidate;
        Ok(Self { path, name, mime_type, size })
    }

    /// File name without its last extension. A name without a dot is kept whole.
    pub fn base_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(i) if i > 0 => &self.name[..i],
            _                => &self.name,
        }
    }

    /// `<base>_motion_analysis.avi`, the name offered for the processed video.
    pub fn download_name(&self) -> String {
        format!("{}_motion_analysis.avi", self.base_name())
    }
}
