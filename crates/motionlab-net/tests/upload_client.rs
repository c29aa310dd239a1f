// crates/motionlab-net/tests/upload_client.rs
//
// UploadClient against a one-shot HTTP server on 127.0.0.1:0.

mod common;

use std::net::TcpListener;
use std::path::PathBuf;

use crossbeam_channel::unbounded;
use uuid::Uuid;

use motionlab_core::upload_types::{FormField, FormKind, UploadEvent, UploadRequest, UploadResponse};
use motionlab_net::{ServiceConfig, UploadClient, GENERIC_ERROR_MESSAGE};

use common::{serve_once, video_file};

fn request(form: FormKind, path: PathBuf, fields: Vec<FormField>) -> UploadRequest {
    UploadRequest {
        job_id:        Uuid::new_v4(),
        form,
        file_path:     path,
        file_name:     "clip.mp4".into(),
        mime_type:     "video/mp4".into(),
        fields,
        response_mode: form.response_mode(),
    }
}

fn client_for(base: &str) -> UploadClient {
    let mut config = ServiceConfig::default();
    config.apply_url_override(base);
    UploadClient::new(config)
}

fn run(client: &UploadClient, req: &UploadRequest) -> Vec<UploadEvent> {
    let (tx, rx) = unbounded();
    client.execute(req, &tx);
    drop(tx);
    rx.iter().collect()
}

/// Sent first, Progress in between and non-decreasing, one terminal event last.
fn assert_lifecycle(events: &[UploadEvent], job_id: Uuid) {
    assert!(matches!(events.first(), Some(UploadEvent::Sent { .. })), "{events:?}");
    assert!(events.last().is_some_and(|e| e.is_terminal()), "{events:?}");
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(events.iter().all(|e| e.job_id() == job_id));

    let mut last = 0u64;
    for e in &events[1..events.len() - 1] {
        let UploadEvent::Progress { loaded, .. } = e else {
            panic!("unexpected mid-stream event {e:?}");
        };
        assert!(*loaded >= last);
        last = *loaded;
    }
}

#[test]
fn scale_reply_completes_with_the_number() {
    let (base, server) = serve_once(200, "application/json", br#"{"result":0.045}"#.to_vec());
    let file = video_file(64 * 1024);
    let req = request(FormKind::Scaling, file.path().to_path_buf(), vec![
        FormField::new("frame_rate", "60"),
        FormField::new("distance", "200"),
    ]);

    let events = run(&client_for(&base), &req);
    assert_lifecycle(&events, req.job_id);
    match events.last().unwrap() {
        UploadEvent::Completed { response: UploadResponse::Scale(s), .. } => assert_eq!(*s, 0.045),
        other => panic!("unexpected {other:?}"),
    }
    let progress = events.iter().filter(|e| matches!(e, UploadEvent::Progress { .. })).count();
    assert!(progress >= 1);

    let captured = server.join().unwrap();
    assert_eq!(captured.request_line, "POST /find-scale HTTP/1.1");
    assert!(captured.header("content-type").unwrap().starts_with("multipart/form-data; boundary="));
    let text = String::from_utf8_lossy(&captured.body);
    assert!(text.contains("name=\"video\"; filename=\"clip.mp4\""));
    assert!(text.contains("name=\"frame_rate\"\r\n\r\n60"));
    assert!(text.contains("name=\"distance\"\r\n\r\n200"));
}

#[test]
fn structured_server_error_is_shown_verbatim() {
    let (base, server) = serve_once(500, "application/json", br#"{"error":"decode failed"}"#.to_vec());
    let file = video_file(1024);
    let req = request(FormKind::Motion, file.path().to_path_buf(), Vec::new());

    let events = run(&client_for(&base), &req);
    assert_lifecycle(&events, req.job_id);
    match events.last().unwrap() {
        UploadEvent::Failed { message, .. } => assert_eq!(message, "decode failed"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(server.join().unwrap().request_line, "POST /motion-analysis HTTP/1.1");
}

#[test]
fn bare_server_error_is_generic() {
    let (base, server) = serve_once(502, "text/html", b"<html>bad gateway</html>".to_vec());
    let file = video_file(1024);
    let req = request(FormKind::Scaling, file.path().to_path_buf(), Vec::new());

    let events = run(&client_for(&base), &req);
    match events.last().unwrap() {
        UploadEvent::Failed { message, .. } => assert_eq!(message, GENERIC_ERROR_MESSAGE),
        other => panic!("unexpected {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn malformed_scale_reply_is_generic() {
    let (base, server) = serve_once(200, "application/json", br#"{"scale":1}"#.to_vec());
    let file = video_file(1024);
    let req = request(FormKind::Scaling, file.path().to_path_buf(), Vec::new());

    let events = run(&client_for(&base), &req);
    match events.last().unwrap() {
        UploadEvent::Failed { message, .. } => assert_eq!(message, GENERIC_ERROR_MESSAGE),
        other => panic!("unexpected {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn video_reply_is_saved_to_disk() {
    let payload = b"RIFF\x00\x00\x00\x00AVI LIST".to_vec();
    let (base, server) = serve_once(200, "video/x-msvideo", payload.clone());
    let file = video_file(8 * 1024);
    let req = request(FormKind::Legacy, file.path().to_path_buf(), vec![
        FormField::new("motion_type", "Sparse"),
    ]);

    let events = run(&client_for(&base), &req);
    assert_lifecycle(&events, req.job_id);
    let UploadEvent::Completed { response: UploadResponse::Video { path }, .. } = events.last().unwrap() else {
        panic!("unexpected {:?}", events.last());
    };
    assert_eq!(std::fs::read(path).unwrap(), payload);
    std::fs::remove_file(path).unwrap();

    assert_eq!(server.join().unwrap().request_line, "POST /upload HTTP/1.1");
}

#[test]
fn unreachable_service_is_generic() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let file = video_file(1024);
    let req = request(FormKind::Scaling, file.path().to_path_buf(), Vec::new());

    let events = run(&client_for(&format!("http://127.0.0.1:{port}")), &req);
    assert!(matches!(events.first(), Some(UploadEvent::Sent { .. })));
    match events.last().unwrap() {
        UploadEvent::Failed { message, .. } => assert_eq!(message, GENERIC_ERROR_MESSAGE),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn vanished_file_still_reports_sent_first() {
    let file = video_file(1024);
    let path = file.path().to_path_buf();
    drop(file);
    let req = request(FormKind::Scaling, path, Vec::new());

    // Never contacted: the body cannot be built.
    let events = run(&client_for("http://127.0.0.1:9"), &req);
    assert_lifecycle(&events, req.job_id);
    assert_eq!(events.len(), 2, "{events:?}");
    match events.last().unwrap() {
        UploadEvent::Failed { message, .. } => assert_eq!(message, GENERIC_ERROR_MESSAGE),
        other => panic!("unexpected {other:?}"),
    }
}
