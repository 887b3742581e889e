mod common;

use common::RecordingNavigator;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use video_uploader::app::status::StatusKind;
use video_uploader::app::{progress_percent, SubmissionPhase, UploadForm, SUBMIT_LABEL};
use video_uploader::upload::validation::{ALLOWED_MIME_TYPES, MAX_FILE_SIZE};
use video_uploader::upload::{
    IntakeError, MemoryStore, SelectedFile, SubmitError, UploadEvent, UploadOutcome, UploadResult,
};
use video_uploader::utils::browser::{NavigationError, Navigator};
use video_uploader::UploaderConfig;

fn form() -> (UploadForm, MemoryStore, RecordingNavigator) {
    let store = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let form = UploadForm::new(
        &UploaderConfig::default(),
        Box::new(store.clone()),
        Box::new(navigator.clone()),
    );
    (form, store, navigator)
}

fn file(mime_type: &str, size: u64) -> SelectedFile {
    SelectedFile {
        name: "clip.mp4".to_string(),
        mime_type: mime_type.to_string(),
        size,
        path: PathBuf::from("clip.mp4"),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Form with a valid file, already submitted and awaiting a response.
fn submitted() -> (UploadForm, MemoryStore, RecordingNavigator, Instant) {
    let (mut form, store, navigator) = form();
    let now = Instant::now();
    form.select_file(file("video/mp4", 10_485_760), now).unwrap();
    form.begin_submit(now).unwrap();
    form.request_dispatched();
    (form, store, navigator, now)
}

fn finish(form: &mut UploadForm, outcome: UploadOutcome, now: Instant) {
    form.apply_event(UploadEvent::Finished(outcome), now);
}

#[test]
fn disallowed_types_are_rejected_and_named() {
    for mime in ["image/jpeg", "audio/mp4", "video/ogg", "application/pdf"] {
        let (mut form, _, _) = form();
        let result = form.select_file(file(mime, 1024), Instant::now());

        assert_eq!(result, Err(IntakeError::UnsupportedType(mime.to_string())));
        assert!(form.selected_file().is_none());
        assert!(form.file_info().is_none());
        let status = form.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains(mime), "{} not named in {}", mime, status.text);
    }
}

#[test]
fn oversize_is_rejected_for_every_allowed_type() {
    for mime in ALLOWED_MIME_TYPES {
        let (mut form, _, _) = form();
        let result = form.select_file(file(mime, MAX_FILE_SIZE + 1), Instant::now());

        assert!(matches!(result, Err(IntakeError::TooLarge { .. })));
        assert!(form.file_info().is_none());
        assert_eq!(
            form.status().unwrap().text,
            "❌ File is too large. Maximum size is 5 GB."
        );
    }
}

#[test]
fn accepted_file_shows_size_in_mib() {
    let (mut form, _, _) = form();
    form.select_file(file("video/quicktime", 10_485_760), Instant::now())
        .unwrap();
    assert_eq!(form.file_info().unwrap().size_label, "Size: 10.00 MB");
}

#[test]
fn submit_without_file_produces_no_job() {
    let (mut form, _, _) = form();
    let result = form.begin_submit(Instant::now());

    assert_eq!(result.unwrap_err(), SubmitError::MissingFile);
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert!(form.submit_control().enabled);
    assert!(!form.progress().visible);
    let status = form.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "❌ Please select a video file.");
}

#[test]
fn submit_disables_button_and_resets_progress() {
    let (form, _, _, _) = submitted();
    let control = form.submit_control();
    assert!(!control.enabled);
    assert_eq!(control.label, "⏳ Uploading...");
    assert_eq!(form.progress().percent, 0);
    assert!(form.progress().visible);
    assert_eq!(form.status().unwrap().text, "📤 Video upload started...");
}

#[test]
fn success_hands_off_result_and_navigates_later() {
    let (mut form, store, navigator, now) = submitted();

    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("abc".to_string()),
            video_link: Some("https://x".to_string()),
            video_type: Some("short".to_string()),
            privacy: Some("public".to_string()),
            analysis: None,
        }),
        now,
    );

    let stored = store.snapshot();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored["video_id"], "abc");
    assert_eq!(stored["video_linki"], "https://x");
    assert_eq!(stored["video_tipi"], "short");
    assert_eq!(stored["gizlilik"], "public");

    assert_eq!(form.progress().percent, 100);
    assert_eq!(form.status().unwrap().kind, StatusKind::Success);
    assert!(!form.submit_control().enabled);
    assert!(navigator.visited().is_empty());

    form.tick(now + ms(1999));
    assert!(navigator.visited().is_empty());
    assert!(form.navigation_pending());

    form.tick(now + ms(2000));
    assert_eq!(navigator.visited(), vec![UploaderConfig::default().result_url]);
    assert!(!form.navigation_pending());
    assert!(form.submit_control().enabled);
    assert_eq!(form.phase(), SubmissionPhase::Idle);
}

#[test]
fn analysis_payload_is_stored_as_json() {
    let (mut form, store, _, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("abc".to_string()),
            video_link: None,
            video_type: None,
            privacy: None,
            analysis: Some(serde_json::json!({"tags": ["sea"]})),
        }),
        now,
    );

    let stored = store.snapshot();
    assert_eq!(stored.len(), 2);
    let analysis: serde_json::Value = serde_json::from_str(&stored["video_analiz"]).unwrap();
    assert_eq!(analysis["tags"][0], "sea");
}

#[test]
fn server_rejection_reenables_form_without_hand_off() {
    let (mut form, store, navigator, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Rejected("quota exceeded".to_string()),
        now,
    );

    let status = form.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("quota exceeded"));
    assert!(store.snapshot().is_empty());
    assert_eq!(form.phase(), SubmissionPhase::Failed);

    let control = form.submit_control();
    assert!(control.enabled);
    assert_eq!(control.label, SUBMIT_LABEL);

    form.tick(now + ms(10_000));
    assert!(navigator.visited().is_empty());
}

#[test]
fn progress_bar_hides_after_failure_delay() {
    let (mut form, _, _, now) = submitted();
    finish(&mut form, UploadOutcome::Malformed, now);
    assert_eq!(
        form.status().unwrap().text,
        "❌ Failed to process the server response."
    );

    form.tick(now + ms(1499));
    assert!(form.progress().visible);
    form.tick(now + ms(1500));
    assert!(!form.progress().visible);
}

#[test]
fn unparseable_error_body_reports_status_code() {
    let (mut form, _, _, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::ServerError {
            status: 502,
            message: None,
        },
        now,
    );
    assert_eq!(form.status().unwrap().text, "❌ Server error: 502");
}

#[test]
fn parsed_error_body_is_shown() {
    let (mut form, _, _, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::ServerError {
            status: 400,
            message: Some("Dosya seçilmedi".to_string()),
        },
        now,
    );
    assert_eq!(form.status().unwrap().text, "❌ Error: Dosya seçilmedi");
}

#[test]
fn transport_and_client_failures_allow_retry() {
    let (mut form, _, _, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Transport("connection refused".to_string()),
        now,
    );
    assert_eq!(
        form.status().unwrap().text,
        "❌ An error occurred during upload. Please try again."
    );

    // The selection survives, so the user can submit again straight away.
    form.begin_submit(now + ms(10)).unwrap();
    finish(
        &mut form,
        UploadOutcome::ClientError("could not open clip.mp4".to_string()),
        now + ms(20),
    );
    assert_eq!(
        form.status().unwrap().text,
        "❌ Error: could not open clip.mp4"
    );
    assert!(form.submit_control().enabled);
}

#[test]
fn displayed_progress_is_monotonic() {
    let (mut form, _, _, now) = submitted();
    let total = 7_919u64;
    let mut last = 0;

    for sent in (0..=total).step_by(37).chain(std::iter::once(total)) {
        form.apply_event(UploadEvent::Progress { sent, total }, now);
        let percent = form.progress().percent;
        assert!(percent >= last, "{} dropped to {}", last, percent);
        assert_eq!(Some(percent), progress_percent(sent, total));
        last = percent;
    }
    assert_eq!(last, 100);
}

#[test]
fn success_message_auto_hides() {
    let (mut form, _, _, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("abc".to_string()),
            video_link: None,
            video_type: None,
            privacy: None,
            analysis: None,
        }),
        now,
    );

    form.tick(now + ms(4999));
    assert!(form.status().is_some());
    form.tick(now + ms(5000));
    assert!(form.status().is_none());
    assert_eq!(form.last_status().unwrap().kind, StatusKind::Success);
}

struct FailingNavigator;

impl Navigator for FailingNavigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError> {
        Err(NavigationError {
            url: url.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"),
        })
    }
}

#[test]
fn navigation_failure_is_reported() {
    let mut form = UploadForm::new(
        &UploaderConfig::default(),
        Box::new(MemoryStore::new()),
        Box::new(FailingNavigator),
    );
    let now = Instant::now();
    form.select_file(file("video/webm", 1024), now).unwrap();
    form.begin_submit(now).unwrap();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("abc".to_string()),
            video_link: None,
            video_type: None,
            privacy: None,
            analysis: None,
        }),
        now,
    );

    form.tick(now + ms(2000));
    let status = form.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("result page"));
    assert!(form.submit_control().enabled);
}

#[test]
fn next_deadline_tracks_pending_timers() {
    let (mut form, _, _, now) = submitted();
    assert_eq!(form.next_deadline(), None);

    finish(&mut form, UploadOutcome::Malformed, now);
    assert_eq!(form.next_deadline(), Some(now + ms(1500)));

    form.tick(now + ms(1500));
    assert_eq!(form.next_deadline(), Some(now + ms(5000)));

    form.tick(now + ms(5000));
    assert_eq!(form.next_deadline(), None);
}

#[test]
fn second_upload_replaces_previous_hand_off() {
    let (mut form, store, navigator, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("first".to_string()),
            video_link: Some("https://first".to_string()),
            video_type: Some("short".to_string()),
            privacy: Some("private".to_string()),
            analysis: Some(serde_json::json!({"score": 9})),
        }),
        now,
    );
    assert_eq!(store.snapshot().len(), 5);
    form.tick(now + ms(2000));
    assert_eq!(navigator.visited().len(), 1);

    let later = now + ms(3000);
    form.select_file(file("video/mp4", 2048), later).unwrap();
    form.begin_submit(later).unwrap();
    form.request_dispatched();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("second".to_string()),
            video_link: Some("https://second".to_string()),
            video_type: None,
            privacy: None,
            analysis: None,
        }),
        later,
    );

    let stored = store.snapshot();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored["video_id"], "second");
    assert_eq!(stored["video_linki"], "https://second");
    assert!(!stored.contains_key("video_analiz"));
}

#[test]
fn intake_during_upload_leaves_the_submission_alone() {
    let (mut form, _, _, now) = submitted();
    form.apply_event(UploadEvent::Progress { sent: 30, total: 100 }, now);

    let mut other = file("video/webm", 4096);
    other.name = "other.webm".to_string();
    assert_eq!(form.select_file(other.clone(), now), Err(IntakeError::Busy));
    assert_eq!(form.drop_file(Some(Ok(other)), now), Some(Err(IntakeError::Busy)));

    assert_eq!(form.selected_file().unwrap().name, "clip.mp4");
    assert_eq!(form.status().unwrap().text, "📤 Uploading... 30%");
    assert!(form.phase().is_in_flight());
}

#[test]
fn intake_while_result_page_is_pending_is_refused() {
    let (mut form, _, navigator, now) = submitted();
    finish(
        &mut form,
        UploadOutcome::Succeeded(UploadResult {
            video_id: Some("abc".to_string()),
            video_link: None,
            video_type: None,
            privacy: None,
            analysis: None,
        }),
        now,
    );

    let result = form.select_file(file("video/mp4", 1024), now + ms(1000));
    assert_eq!(result, Err(IntakeError::Busy));
    assert_eq!(form.status().unwrap().kind, StatusKind::Success);

    form.tick(now + ms(2000));
    assert_eq!(navigator.visited().len(), 1);
    form.select_file(file("video/mp4", 1024), now + ms(2100)).unwrap();
    assert!(form.selected_file().is_some());
}
