// crates/motionlab-core/src/form.rs
//
// UploadForm: one form's complete state: parameters, selected file, session
// and the job currently in flight.
//
// The UI never touches these fields directly; it calls select_file /
// begin_upload and feeds every worker event through apply(). apply() returns
// an outcome exactly once per job, on its terminal event.

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::ValidationError;
use crate::file::{FileCandidate, SelectedFile};
use crate::params::ParameterRecord;
use crate::session::SessionState;
use crate::store::ParameterStore;
use crate::upload_types::{FormKind, UploadEvent, UploadRequest, UploadResponse};

pub const VIDEO_SUCCESS_MESSAGE: &str = "Video processed successfully and downloaded!";

/// What a finished job hands back to the app.
#[derive(Clone, Debug, PartialEq)]
pub enum FormOutcome<R> {
    /// JSON reply. `params` is the record as it was when the upload started.
    ScaleComputed { scale: f64, params: R },
    /// Video reply written to `path`; offer it to the user as `download_name`.
    VideoReady { path: PathBuf, download_name: String },
}

#[derive(Clone, Debug)]
struct PendingJob<R> {
    job_id:        Uuid,
    params:        R,
    download_name: String,
}

#[derive(Clone, Debug)]
pub struct UploadForm<R: ParameterRecord> {
    kind:    FormKind,
    pub params: ParameterStore<R>,
    file:    Option<SelectedFile>,
    session: SessionState,
    pending: Option<PendingJob<R>>,
}

impl<R: ParameterRecord> UploadForm<R> {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            params:  ParameterStore::default(),
            file:    None,
            session: SessionState::Idle,
            pending: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn active_job(&self) -> Option<Uuid> {
        self.pending.as_ref().map(|p| p.job_id)
    }

    /// Validate and store a picked file. On success any previous banner is
    /// cleared; on failure the handle is cleared and the fixed error shown.
    /// Refused while an upload is in flight.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        if self.session.is_uploading() {
            return Err(ValidationError::UploadInProgress);
        }
        match SelectedFile::validate(candidate) {
            Ok(file) => {
                self.file = Some(file);
                self.session = SessionState::Idle;
                Ok(())
            }
            Err(e) => {
                self.file = None;
                self.session.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Snapshot the file and parameters into a request and enter Uploading.
    pub fn begin_upload(&mut self) -> Result<UploadRequest, ValidationError> {
        if self.session.is_uploading() {
            return Err(ValidationError::UploadInProgress);
        }
        let Some(file) = self.file.as_ref() else {
            let err = ValidationError::NoFileSelected;
            self.session.fail(err.to_string());
            return Err(err);
        };

        let job_id = Uuid::new_v4();
        let params = self.params.get().clone();
        let request = UploadRequest {
            job_id,
            form:          self.kind,
            file_path:     file.path.clone(),
            file_name:     file.name.clone(),
            mime_type:     file.mime_type.clone(),
            fields:        params.form_fields(),
            response_mode: self.kind.response_mode(),
        };
        self.pending = Some(PendingJob {
            job_id,
            params,
            download_name: file.download_name(),
        });
        self.session.begin(request.response_mode);
        Ok(request)
    }

    /// Feed one worker event. Events for other jobs are ignored.
    pub fn apply(&mut self, event: &UploadEvent) -> Option<FormOutcome<R>> {
        if self.active_job() != Some(event.job_id()) {
            return None;
        }
        match event {
            UploadEvent::Sent { .. } => {
                self.session.on_sent();
                None
            }
            UploadEvent::Progress { loaded, total, .. } => {
                self.session.on_progress(*loaded, *total);
                None
            }
            UploadEvent::Completed { response, .. } => {
                let job = self.pending.take()?;
                self.file = None;
                match response {
                    UploadResponse::Scale(scale) => {
                        self.session.succeed(format!("Scale computed: {scale} cm/px"));
                        Some(FormOutcome::ScaleComputed { scale: *scale, params: job.params })
                    }
                    UploadResponse::Video { path } => {
                        self.session.succeed(VIDEO_SUCCESS_MESSAGE);
                        Some(FormOutcome::VideoReady {
                            path:          path.clone(),
                            download_name: job.download_name,
                        })
                    }
                }
            }
            UploadEvent::Failed { message, .. } => {
                self.pending = None;
                self.file = None;
                self.session.fail(message.clone());
                None
            }
        }
    }

    /// The reply arrived but could not be handed to the user (save failed or
    /// was cancelled). Only replaces a success banner.
    pub fn report_delivery_error(&mut self, message: impl Into<String>) {
        if self.session.success_message().is_some() {
            self.session.fail(message);
        }
    }

    /// Replace the success banner after the video has been saved somewhere.
    pub fn report_delivered(&mut self, message: impl Into<String>) {
        if self.session.success_message().is_some() {
            self.session.succeed(message);
        }
    }

    pub fn dismiss_messages(&mut self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{LegacyParameters, ProcessingParameters, VideoParams};
    use crate::upload_types::ResponseMode;

    fn video(name: &str, size: u64) -> FileCandidate {
        FileCandidate {
            path:      PathBuf::from(format!("/videos/{name}")),
            name:      name.to_string(),
            mime_type: "video/mp4".into(),
            size,
        }
    }

    #[test]
    fn rejected_selection_clears_handle() {
        let mut form = UploadForm::<VideoParams>::new(FormKind::Scaling);
        form.select_file(video("a.mp4", 1)).unwrap();
        let bad = FileCandidate { mime_type: "image/png".into(), ..video("b.png", 1) };
        assert!(form.select_file(bad).is_err());
        assert!(form.selected_file().is_none());
        assert_eq!(form.session().error_message(), Some("Please select a valid video file"));
    }

    #[test]
    fn valid_selection_clears_messages() {
        let mut form = UploadForm::<LegacyParameters>::new(FormKind::Legacy);
        let _ = form.begin_upload();
        assert!(form.session().error_message().is_some());
        form.select_file(video("a.mp4", 1)).unwrap();
        assert_eq!(form.session(), &SessionState::Idle);
    }

    #[test]
    fn upload_without_file_is_local_error() {
        let mut form = UploadForm::<ProcessingParameters>::new(FormKind::Motion);
        assert_eq!(form.begin_upload().unwrap_err(), ValidationError::NoFileSelected);
        assert!(!form.session().is_uploading());
    }

    #[test]
    fn request_carries_flattened_fields() {
        let mut form = UploadForm::<ProcessingParameters>::new(FormKind::Motion);
        form.select_file(video("walk.mp4", 10)).unwrap();
        let req = form.begin_upload().unwrap();
        assert_eq!(req.form, FormKind::Motion);
        assert_eq!(req.response_mode, ResponseMode::Blob);
        assert!(req.fields.iter().any(|f| f.name == "resolution_width" && f.value == "1280"));
        assert!(form.session().is_uploading());
        assert_eq!(form.begin_upload().unwrap_err(), ValidationError::UploadInProgress);
    }

    #[test]
    fn scale_success_emits_submitted_params() {
        let mut form = UploadForm::<VideoParams>::new(FormKind::Scaling);
        form.select_file(video("ruler.mp4", 10 * 1024 * 1024)).unwrap();
        form.params.update("frame_rate", "60").unwrap();
        form.params.update("distance", "200").unwrap();
        let req = form.begin_upload().unwrap();

        // Edits made while uploading do not leak into the emitted result.
        form.params.update("distance", "999").unwrap();

        let id = req.job_id;
        assert_eq!(form.apply(&UploadEvent::Sent { job_id: id }), None);
        assert_eq!(form.apply(&UploadEvent::Progress { job_id: id, loaded: 5, total: Some(10) }), None);
        assert_eq!(form.session().progress(), 50);

        let out = form.apply(&UploadEvent::Completed { job_id: id, response: UploadResponse::Scale(0.045) });
        match out {
            Some(FormOutcome::ScaleComputed { scale, params }) => {
                assert_eq!(scale, 0.045);
                assert_eq!(params.frame_rate, 60.0);
                assert_eq!(params.distance, 200.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(form.session().success_message().unwrap().contains("0.045"));
        assert!(form.selected_file().is_none());
        assert!(!form.session().is_uploading());
    }

    #[test]
    fn failure_resets_to_idle_with_message() {
        let mut form = UploadForm::<ProcessingParameters>::new(FormKind::Motion);
        form.select_file(video("walk.mp4", 10)).unwrap();
        let id = form.begin_upload().unwrap().job_id;
        form.apply(&UploadEvent::Failed { job_id: id, message: "decode failed".into() });
        assert_eq!(form.session().error_message(), Some("decode failed"));
        assert!(!form.session().is_uploading());
        assert!(form.selected_file().is_none());
        assert_eq!(form.active_job(), None);
    }

    #[test]
    fn at_most_one_terminal_outcome() {
        let mut form = UploadForm::<LegacyParameters>::new(FormKind::Legacy);
        form.select_file(video("clip.mov", 10)).unwrap();
        let id = form.begin_upload().unwrap().job_id;
        let done = UploadEvent::Completed {
            job_id:   id,
            response: UploadResponse::Video { path: PathBuf::from("/tmp/x.avi") },
        };
        let first = form.apply(&done);
        assert_eq!(
            first,
            Some(FormOutcome::VideoReady {
                path:          PathBuf::from("/tmp/x.avi"),
                download_name: "clip_motion_analysis.avi".into(),
            }),
        );
        assert_eq!(form.apply(&done), None);
        assert_eq!(form.apply(&UploadEvent::Progress { job_id: id, loaded: 1, total: Some(1) }), None);
        assert_eq!(form.session().success_message(), Some(VIDEO_SUCCESS_MESSAGE));
    }

    #[test]
    fn foreign_job_events_are_ignored() {
        let mut form = UploadForm::<VideoParams>::new(FormKind::Scaling);
        form.select_file(video("ruler.mp4", 10)).unwrap();
        form.begin_upload().unwrap();
        let other = Uuid::new_v4();
        assert_eq!(form.apply(&UploadEvent::Failed { job_id: other, message: "x".into() }), None);
        assert!(form.session().is_uploading());
    }
}
