// crates/motionlab-core/src/state.rs
//
// All form state for one window. No egui, no runtime handles.
// Parameters are intentionally not persisted: every launch starts from the
// hard-coded defaults.

use crate::form::UploadForm;
use crate::params::{LegacyParameters, ProcessingParameters, VideoParams};
use crate::sync::{ScaleResult, SyncInputs};
use crate::upload_types::{FormKind, UploadEvent};

#[derive(Clone, Debug)]
pub struct FormsState {
    pub scaling: UploadForm<VideoParams>,
    pub motion:  UploadForm<ProcessingParameters>,
    pub legacy:  UploadForm<LegacyParameters>,
    /// Latest scale calibration, consumed by the motion form only.
    pub sync:    SyncInputs,
}

impl Default for FormsState {
    fn default() -> Self {
        Self {
            scaling: UploadForm::new(FormKind::Scaling),
            motion:  UploadForm::new(FormKind::Motion),
            legacy:  UploadForm::new(FormKind::Legacy),
            sync:    SyncInputs::default(),
        }
    }
}

impl FormsState {
    pub fn is_uploading(&self, form: FormKind) -> bool {
        match form {
            FormKind::Scaling => self.scaling.session().is_uploading(),
            FormKind::Motion  => self.motion.session().is_uploading(),
            FormKind::Legacy  => self.legacy.session().is_uploading(),
        }
    }

    pub fn any_uploading(&self) -> bool {
        FormKind::ALL.iter().any(|f| self.is_uploading(*f))
    }

    /// Fold a new calibration into the motion form. Returns true when the
    /// motion parameters changed.
    pub fn accept_scale(&mut self, result: ScaleResult) -> bool {
        if !self.sync.push(result) {
            return false;
        }
        self.sync.apply_to(&mut self.motion.params)
    }

    /// Route an event to whichever form owns its job.
    pub fn owner_of(&self, event: &UploadEvent) -> Option<FormKind> {
        let id = Some(event.job_id());
        if self.scaling.active_job() == id {
            Some(FormKind::Scaling)
        } else if self.motion.active_job() == id {
            Some(FormKind::Motion)
        } else if self.legacy.active_job() == id {
            Some(FormKind::Legacy)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileCandidate;
    use crate::form::FormOutcome;
    use crate::upload_types::UploadResponse;

    #[test]
    fn scale_flows_from_scaling_to_motion_only() {
        let mut state = FormsState::default();
        state.scaling.select_file(FileCandidate {
            path:      "/v/ruler.mp4".into(),
            name:      "ruler.mp4".into(),
            mime_type: "video/mp4".into(),
            size:      10 * 1024 * 1024,
        }).unwrap();
        state.scaling.params.update("frame_rate", "60").unwrap();
        state.scaling.params.update("distance", "200").unwrap();
        let req = state.scaling.begin_upload().unwrap();

        let done = UploadEvent::Completed { job_id: req.job_id, response: UploadResponse::Scale(0.045) };
        assert_eq!(state.owner_of(&done), Some(FormKind::Scaling));
        let Some(FormOutcome::ScaleComputed { scale, params }) = state.scaling.apply(&done) else {
            panic!("expected a scale");
        };
        let scaling_before = state.scaling.params.get().clone();
        assert!(state.accept_scale(ScaleResult { scale, params }));

        assert_eq!(state.motion.params.get().active_scale, 0.045);
        assert_eq!(state.motion.params.get().frame_rate, 60.0);
        assert_eq!(state.motion.params.get().scale_dist, 200.0);
        assert_eq!(state.scaling.params.get(), &scaling_before);
        assert!(!state.any_uploading());
    }
}
