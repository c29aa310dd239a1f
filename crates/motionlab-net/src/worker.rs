// crates/motionlab-net/src/worker.rs
//
// UploadWorker: owns the upload thread pool and the shared result channel.
// All public API that motionlab-ui calls lives here.

use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};

use motionlab_core::upload_types::{UploadEvent, UploadRequest};

use crate::client::UploadClient;
use crate::config::ServiceConfig;
use crate::error::GENERIC_ERROR_MESSAGE;

// ── UploadWorker ──────────────────────────────────────────────────────────────

pub struct UploadWorker {
    /// Shared result channel: Sent, Progress and terminal events of every job.
    /// Drained once per frame by `AppContext::ingest_upload_events`.
    pub rx:   Receiver<UploadEvent>,
    tx:       Sender<UploadEvent>,
    client:   Arc<UploadClient>,
    shutdown: Arc<AtomicBool>,
}

impl UploadWorker {
    pub fn new(config: ServiceConfig) -> Self {
        // Progress is capped at ~101 events per job, so 512 covers a few
        // concurrent uploads between two UI frames.
        let (tx, rx) = bounded(512);
        Self {
            rx,
            tx,
            client:   Arc::new(UploadClient::new(config)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        self.client.config()
    }

    /// Spawn a background thread that runs `request` to completion.
    ///
    /// Each form allows one in-flight job, but the forms are independent, so
    /// several jobs may run at once. Events carry the job id; the UI routes them.
    pub fn start(&self, request: UploadRequest) {
        let tx     = self.tx.clone();
        let sd     = self.shutdown.clone();
        let client = Arc::clone(&self.client);

        log::info!("[worker] starting {} ({:?})", request.job_id, request.form);
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) {
                log::warn!("[worker] {} dropped: worker shutting down", request.job_id);
                let _ = tx.send(UploadEvent::Failed {
                    job_id:  request.job_id,
                    message: GENERIC_ERROR_MESSAGE.into(),
                });
                return;
            }
            client.execute(&request, &tx);
        });
    }

    /// Refuse new jobs. In-flight requests run to their own terminal event.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
