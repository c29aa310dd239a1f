// crates/motionlab-net/src/multipart.rs
//
// multipart/form-data body with a length known up front.
//
// Layout:
//   head: boundary + headers of the `video` file part
//   file: the video bytes, streamed from disk (never buffered whole)
//   tail: one part per text field, then the closing boundary
//
// head and tail are small and built in memory; the total length is exact, so
// the request carries a Content-Length and progress has a real denominator.

use std::fs::File;
use std::io::{self, Cursor, Read};

use uuid::Uuid;

use motionlab_core::upload_types::UploadRequest;

/// Field name of the file part.
pub const FILE_FIELD: &str = "video";

pub struct MultipartBody {
    boundary:  String,
    head:      Vec<u8>,
    file:      File,
    file_len:  u64,
    tail:      Vec<u8>,
}

impl MultipartBody {
    pub fn build(request: &UploadRequest) -> io::Result<Self> {
        let file     = File::open(&request.file_path)?;
        let file_len = file.metadata()?.len();
        let boundary = format!("----motionlab-{}", Uuid::new_v4().simple());

        let head = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{}\"\r\n\
             Content-Type: {}\r\n\r\n",
            quote(&request.file_name),
            request.mime_type,
        )
        .into_bytes();

        let mut tail = String::new();
        for field in &request.fields {
            tail.push_str(&format!(
                "\r\n--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                quote(&field.name),
                field.value,
            ));
        }
        tail.push_str(&format!("\r\n--{boundary}--\r\n"));

        Ok(Self { boundary, head, file, file_len, tail: tail.into_bytes() })
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Exact byte length of the encoded body.
    pub fn len(&self) -> u64 {
        self.head.len() as u64 + self.file_len + self.tail.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `take(file_len)` pins the file part to the length measured at build
    /// time, so a file growing on disk cannot break Content-Length.
    pub fn into_reader(self) -> impl Read + Send + 'static {
        Cursor::new(self.head)
            .chain(self.file.take(self.file_len))
            .chain(Cursor::new(self.tail))
    }
}

/// Header-safe quoted-string content: no CR/LF, escaped quotes.
fn quote(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { "%22".to_string() } else { c.to_string() })
        .collect()
}
