// crates/motionlab-net/src/progress.rs
//
// Read adapter that reports upload progress as the HTTP client pulls the
// request body.
//
// One Progress event per whole-percent change keeps the channel quiet on
// large files (at most 101 events per upload) while still moving the bar
// smoothly. Byte counts only grow, so the reported values never decrease.

use std::io::{self, Read};

use crossbeam_channel::Sender;
use uuid::Uuid;

use motionlab_core::helpers::units::percent;
use motionlab_core::upload_types::UploadEvent;

pub struct ProgressReader<R> {
    inner:    R,
    job_id:   Uuid,
    loaded:   u64,
    total:    u64,
    last_pct: Option<u8>,
    tx:       Sender<UploadEvent>,
}

impl<R: Read> ProgressReader<R> {
    pub fn new(inner: R, total: u64, job_id: Uuid, tx: Sender<UploadEvent>) -> Self {
        Self { inner, job_id, loaded: 0, total, last_pct: None, tx }
    }

    pub fn loaded(&self) -> u64 {
        self.loaded
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.loaded += n as u64;

        let pct = percent(self.loaded, self.total);
        if pct.is_some() && pct != self.last_pct {
            self.last_pct = pct;
            // A dropped receiver only means nobody is watching any more.
            let _ = self.tx.send(UploadEvent::Progress {
                job_id: self.job_id,
                loaded: self.loaded,
                total:  Some(self.total),
            });
        }
        Ok(n)
    }
}
