// crates/motionlab-ui/src/context.rs
//
// AppContext owns all runtime handles that are NOT part of the form state.
// MotionLabApp holds one of these plus a FormsState and the panel list,
// nothing else.
//
//   AppContext
//     └── worker: the UploadWorker and its event channel

use eframe::egui;

use motionlab_core::commands::FormCommand;
use motionlab_core::form::{FormOutcome, UploadForm};
use motionlab_core::params::ParameterRecord;
use motionlab_core::state::FormsState;
use motionlab_core::sync::ScaleResult;
use motionlab_core::upload_types::{FormKind, UploadEvent};
use motionlab_net::UploadWorker;

pub struct AppContext {
    pub worker: UploadWorker,
}

impl AppContext {
    pub fn new(worker: UploadWorker) -> Self {
        Self { worker }
    }

    /// Drain the worker channel and feed every event to the form that owns
    /// its job. Called once per frame, before the panels are drawn.
    ///
    /// Outcomes that need more than a state change (propagating a scale,
    /// saving a video) come back as commands for app.rs to process.
    pub fn ingest_upload_events(
        &mut self,
        state: &mut FormsState,
        ctx:   &egui::Context,
    ) -> Vec<FormCommand> {
        let mut follow_up = Vec::new();
        let mut any = false;

        while let Ok(event) = self.worker.rx.try_recv() {
            any = true;
            let Some(kind) = state.owner_of(&event) else {
                // Job no form is waiting for (e.g. a reply after a reset).
                log::debug!("[upload] dropping event for unknown job {}", event.job_id());
                continue;
            };
            match kind {
                FormKind::Scaling => {
                    if let Some(FormOutcome::ScaleComputed { scale, params }) =
                        apply(&mut state.scaling, &event)
                    {
                        follow_up.push(FormCommand::ScaleComputed(ScaleResult { scale, params }));
                    }
                }
                FormKind::Motion => {
                    if let Some(cmd) = video_follow_up(kind, apply(&mut state.motion, &event)) {
                        follow_up.push(cmd);
                    }
                }
                FormKind::Legacy => {
                    if let Some(cmd) = video_follow_up(kind, apply(&mut state.legacy, &event)) {
                        follow_up.push(cmd);
                    }
                }
            }
        }

        if any {
            ctx.request_repaint();
        }
        follow_up
    }
}

fn apply<R: ParameterRecord>(form: &mut UploadForm<R>, event: &UploadEvent) -> Option<FormOutcome<R>> {
    let outcome = form.apply(event);
    if event.is_terminal() {
        match form.session().error_message() {
            Some(msg) => log::info!("[upload] {:?} failed: {msg}", form.kind()),
            None      => log::info!("[upload] {:?} finished", form.kind()),
        }
    }
    outcome
}

fn video_follow_up<R>(form: FormKind, outcome: Option<FormOutcome<R>>) -> Option<FormCommand> {
    match outcome? {
        FormOutcome::VideoReady { path, download_name } => {
            Some(FormCommand::SaveVideo { form, path, download_name })
        }
        FormOutcome::ScaleComputed { scale, .. } => {
            log::warn!("[upload] {form:?} got a scale ({scale}) instead of a video");
            None
        }
    }
}
