// crates/motionlab-net/src/client.rs
//
// UploadClient: one blocking POST per UploadRequest, driven from a worker
// thread. No retries; every failure is terminal for that request.
//
// Event contract (per job, on the given Sender):
//   Sent → Progress* → exactly one of Completed / Failed
// The body reader is fully consumed before ureq returns, so no Progress can
// trail the terminal event.

use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Sender;
use serde::Deserialize;

use motionlab_core::upload_types::{ResponseMode, UploadEvent, UploadRequest, UploadResponse};

use crate::config::ServiceConfig;
use crate::error::UploadError;
use crate::multipart::MultipartBody;
use crate::progress::ProgressReader;

/// `{ "result": number }` from `/find-scale`.
#[derive(Deserialize)]
struct ScaleReply {
    result: f64,
}

/// Optional structured error body on non-2xx replies.
#[derive(Deserialize)]
struct ErrorReply {
    error: Option<String>,
}

pub struct UploadClient {
    agent:  ureq::Agent,
    config: ServiceConfig,
}

impl UploadClient {
    pub fn new(config: ServiceConfig) -> Self {
        // Non-2xx replies still carry the `{ error }` body we want to show,
        // so status codes are inspected here instead of turned into errors.
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run one request to completion, reporting every lifecycle event on `tx`.
    pub fn execute(&self, request: &UploadRequest, tx: &Sender<UploadEvent>) {
        let job_id = request.job_id;
        let event = match self.send(request, tx) {
            Ok(response) => {
                log::info!("[upload] {job_id} completed");
                UploadEvent::Completed { job_id, response }
            }
            Err(e) => {
                log::warn!("[upload] {job_id} failed: {e}");
                UploadEvent::Failed { job_id, message: e.user_message() }
            }
        };
        let _ = tx.send(event);
    }

    fn send(&self, request: &UploadRequest, tx: &Sender<UploadEvent>) -> Result<UploadResponse, UploadError> {
        // Sent goes out before anything can fail, so even a file that vanished
        // since selection yields Sent → Failed.
        let _ = tx.send(UploadEvent::Sent { job_id: request.job_id });

        let url   = self.config.endpoint_url(request.form);
        let body  = MultipartBody::build(request)?;
        let total = body.len();
        let content_type = body.content_type();

        log::info!(
            "[upload] {} POST {url} ({} bytes, {} fields)",
            request.job_id, total, request.fields.len(),
        );

        let mut reader = ProgressReader::new(body.into_reader(), total, request.job_id, tx.clone());
        let response = self.agent
            .post(&url)
            .header("Content-Type", content_type.as_str())
            .header("Content-Length", total.to_string().as_str())
            .send(ureq::SendBody::from_reader(&mut reader))?;

        let status = response.status();
        let mut body = response.into_body();

        if !status.is_success() {
            let bytes = body.read_to_vec().unwrap_or_default();
            return Err(UploadError::Server {
                status:  status.as_u16(),
                message: server_error_message(&bytes),
            });
        }

        match request.response_mode {
            ResponseMode::Json => {
                let bytes = body.read_to_vec()?;
                let reply: ScaleReply = serde_json::from_slice(&bytes)?;
                Ok(UploadResponse::Scale(reply.result))
            }
            ResponseMode::Blob => {
                let path = save_blob(body.into_reader())?;
                log::info!("[upload] {} video reply → {}", request.job_id, path.display());
                Ok(UploadResponse::Video { path })
            }
        }
    }
}

/// The `error` string of a JSON error body, if there is a non-empty one.
pub fn server_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorReply>(body)
        .ok()
        .and_then(|r| r.error)
        .filter(|m| !m.is_empty())
}

/// Stream a video reply into a kept temp file and return its path.
fn save_blob(mut reader: impl Read) -> Result<PathBuf, UploadError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("motionlab_")
        .suffix(".avi")
        .tempfile()?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    let (_file, path) = tmp.keep().map_err(|e| e.error)?;
    Ok(path)
}
