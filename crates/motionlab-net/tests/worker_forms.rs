// crates/motionlab-net/tests/worker_forms.rs
//
// Full path: form → UploadWorker → service → channel → form → sync.

mod common;

use std::time::Duration;

use motionlab_core::file::FileCandidate;
use motionlab_core::form::FormOutcome;
use motionlab_core::params::VideoParams;
use motionlab_core::state::FormsState;
use motionlab_core::sync::ScaleResult;
use motionlab_core::upload_types::{FormKind, UploadEvent};
use motionlab_net::{ServiceConfig, UploadWorker};

use common::{serve_once, video_file};

fn worker_for(base: &str) -> UploadWorker {
    let mut config = ServiceConfig::default();
    config.apply_url_override(base);
    UploadWorker::new(config)
}

/// Route worker events into `state` until the owning form sees its terminal
/// event. Returns whatever outcome that produced.
fn pump_scaling(worker: &UploadWorker, state: &mut FormsState) -> Option<FormOutcome<VideoParams>> {
    loop {
        let event = worker.rx.recv_timeout(Duration::from_secs(30)).unwrap();
        assert_eq!(state.owner_of(&event), Some(FormKind::Scaling));
        let terminal = event.is_terminal();
        let outcome = state.scaling.apply(&event);
        if terminal {
            return outcome;
        }
        assert!(state.scaling.session().is_uploading());
    }
}

#[test]
fn scale_calibration_reaches_the_motion_form() {
    let (base, server) = serve_once(200, "application/json", br#"{"result":0.045}"#.to_vec());
    let worker = worker_for(&base);
    let mut state = FormsState::default();

    let file = video_file(10 * 1024 * 1024);
    state.scaling.select_file(FileCandidate::from_path(file.path()).unwrap()).unwrap();
    state.scaling.params.update("frame_rate", "60").unwrap();
    state.scaling.params.update("distance", "200").unwrap();
    let motion_before = state.motion.params.get().clone();

    let request = state.scaling.begin_upload().unwrap();
    worker.start(request);

    let Some(FormOutcome::ScaleComputed { scale, params }) = pump_scaling(&worker, &mut state) else {
        panic!("expected a scale, got {:?}", state.scaling.session());
    };
    assert_eq!(scale, 0.045);
    assert_eq!(state.scaling.session().success_message(), Some("Scale computed: 0.045 cm/px"));
    assert!(state.scaling.selected_file().is_none());
    assert!(!state.any_uploading());

    assert!(state.accept_scale(ScaleResult { scale, params }));
    let motion = state.motion.params.get();
    assert_eq!(motion.active_scale, 0.045);
    assert_eq!(motion.frame_rate, 60.0);
    assert_eq!(motion.scale_dist, 200.0);
    assert_ne!(motion, &motion_before);

    let captured = server.join().unwrap();
    assert_eq!(captured.request_line, "POST /find-scale HTTP/1.1");
    assert!(captured.body.len() > 10 * 1024 * 1024);
}

#[test]
fn service_error_is_shown_and_the_form_resets() {
    let (base, server) = serve_once(500, "application/json", br#"{"error":"decode failed"}"#.to_vec());
    let worker = worker_for(&base);
    let mut state = FormsState::default();

    let file = video_file(64 * 1024);
    state.scaling.select_file(FileCandidate::from_path(file.path()).unwrap()).unwrap();
    let motion_before = state.motion.params.get().clone();

    let request = state.scaling.begin_upload().unwrap();
    worker.start(request);

    assert_eq!(pump_scaling(&worker, &mut state), None);
    assert_eq!(state.scaling.session().error_message(), Some("decode failed"));
    assert!(!state.scaling.session().is_uploading());
    assert!(state.scaling.selected_file().is_none());
    assert_eq!(state.scaling.active_job(), None);
    assert_eq!(state.motion.params.get(), &motion_before);

    server.join().unwrap();
}

#[test]
fn first_event_from_the_worker_is_sent() {
    let (base, server) = serve_once(200, "application/json", br#"{"result":1.5}"#.to_vec());
    let worker = worker_for(&base);
    let mut state = FormsState::default();

    let file = video_file(4 * 1024);
    state.scaling.select_file(FileCandidate::from_path(file.path()).unwrap()).unwrap();
    let request = state.scaling.begin_upload().unwrap();
    let job_id = request.job_id;
    worker.start(request);

    let first = worker.rx.recv_timeout(Duration::from_secs(30)).unwrap();
    assert_eq!(first, UploadEvent::Sent { job_id });
    state.scaling.apply(&first);
    assert!(state.scaling.session().is_uploading());

    let _ = pump_scaling(&worker, &mut state);
    server.join().unwrap();
}
