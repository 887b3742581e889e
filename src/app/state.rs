use super::status::{StatusKind, StatusLine, StatusMessage};
use crate::config::UploaderConfig;
use crate::upload::handoff::{
    KEY_ANALYSIS, KEY_PRIVACY, KEY_VIDEO_ID, KEY_VIDEO_LINK, KEY_VIDEO_TYPE,
};
use crate::upload::validation::validate_file;
use crate::upload::{
    HandoffStore, IntakeError, SelectedFile, SubmitError, UploadEvent, UploadFormFields,
    UploadJob, UploadOutcome, UploadResult,
};
use crate::utils::browser::Navigator;
use crate::utils::file_size::FileSizeUtils;
use derivative::Derivative;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const SUBMIT_LABEL: &str = "⬆️ Upload";
pub const SUBMIT_BUSY_LABEL: &str = "⏳ Uploading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    AwaitingResponse,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionPhase::Submitting | SubmissionPhase::AwaitingResponse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub percent: u8,
    pub visible: bool,
}

impl ProgressState {
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name_label: String,
    pub size_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL,
        }
    }
}

/// `round(sent / total * 100)`, or `None` when the total is unknown.
pub fn progress_percent(sent: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let percent = (sent as f64 / total as f64 * 100.0).round().clamp(0.0, 100.0);
    Some(percent as u8)
}

/// State of the upload form. Rendering reads it; user input and worker
/// events mutate it. Timed effects are deadlines fired by [`UploadForm::tick`].
#[derive(Derivative)]
#[derivative(Debug)]
pub struct UploadForm {
    pub fields: UploadFormFields,
    selected_file: Option<SelectedFile>,
    file_info: Option<FileInfo>,
    drop_active: bool,
    status: StatusLine,
    progress: ProgressState,
    progress_hide_at: Option<Instant>,
    submit: SubmitControl,
    phase: SubmissionPhase,
    navigate_at: Option<Instant>,
    result_url: String,
    progress_hide_after: Duration,
    navigate_after: Duration,
    #[derivative(Debug = "ignore")]
    store: Box<dyn HandoffStore>,
    #[derivative(Debug = "ignore")]
    navigator: Box<dyn Navigator>,
}

impl UploadForm {
    pub fn new(
        config: &UploaderConfig,
        store: Box<dyn HandoffStore>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        Self {
            fields: UploadFormFields::default(),
            selected_file: None,
            file_info: None,
            drop_active: false,
            status: StatusLine::new(config.status_hide_after),
            progress: ProgressState::default(),
            progress_hide_at: None,
            submit: SubmitControl::default(),
            phase: SubmissionPhase::Idle,
            navigate_at: None,
            result_url: config.result_url.clone(),
            progress_hide_after: config.progress_hide_after,
            navigate_after: config.navigate_after,
            store,
            navigator,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    pub fn is_drop_active(&self) -> bool {
        self.drop_active
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.visible()
    }

    pub fn last_status(&self) -> Option<&StatusMessage> {
        self.status.last()
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn navigation_pending(&self) -> bool {
        self.navigate_at.is_some()
    }

    /// In flight, or waiting to open the result page.
    pub fn is_busy(&self) -> bool {
        self.phase.is_in_flight() || self.navigate_at.is_some()
    }

    pub fn show_message(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.status.show(text, kind, now);
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.progress = ProgressState {
            percent: percent.min(100),
            visible: true,
        };
    }

    pub fn select_file(&mut self, file: SelectedFile, now: Instant) -> Result<(), IntakeError> {
        self.intake(Ok(file), now)
    }

    /// Takes a file from the picker or a drop. While an upload is in flight
    /// or the result page is pending, intake is refused and nothing changes.
    pub fn intake(
        &mut self,
        file: Result<SelectedFile, IntakeError>,
        now: Instant,
    ) -> Result<(), IntakeError> {
        if self.is_busy() {
            debug!("Intake ignored, an upload is in progress");
            return Err(IntakeError::Busy);
        }

        let file = match file {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not take the selected file: {}", e);
                return self.reject(e, now);
            }
        };

        if let Err(e) = validate_file(&file) {
            warn!(
                "Rejected '{}' ({}, {}): {}",
                file.name,
                file.mime_type,
                FileSizeUtils::format_size(file.size),
                e
            );
            return self.reject(e, now);
        }

        info!("Selected '{}' ({} bytes)", file.name, file.size);
        self.file_info = Some(FileInfo {
            name_label: format!("📹 {}", file.name),
            size_label: format!("Size: {}", FileSizeUtils::format_mib(file.size)),
        });
        self.selected_file = Some(file);
        self.show_message(
            "✅ File selected. Add a title and description, then upload.",
            StatusKind::Info,
            now,
        );
        Ok(())
    }

    fn reject(&mut self, e: IntakeError, now: Instant) -> Result<(), IntakeError> {
        self.show_message(format!("❌ {}", e), StatusKind::Error, now);
        self.selected_file = None;
        self.file_info = None;
        Err(e)
    }

    pub fn drag_over(&mut self) {
        self.drop_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drop_active = false;
    }

    /// Ends a drag with the first dropped file, or with `None` when the
    /// drop carried no files.
    pub fn drop_file(
        &mut self,
        dropped: Option<Result<SelectedFile, IntakeError>>,
        now: Instant,
    ) -> Option<Result<(), IntakeError>> {
        self.drop_active = false;
        let dropped = dropped?;
        if let Ok(file) = &dropped {
            debug!("Dropped '{}'", file.name);
        }
        Some(self.intake(dropped, now))
    }

    pub fn begin_submit(&mut self, now: Instant) -> Result<UploadJob, SubmitError> {
        if self.is_busy() {
            debug!("Submit ignored, an upload is already in progress");
            return Err(SubmitError::InFlight);
        }

        let Some(file) = self.selected_file.clone() else {
            self.show_message(
                format!("❌ {}", SubmitError::MissingFile),
                StatusKind::Error,
                now,
            );
            return Err(SubmitError::MissingFile);
        };

        info!("Starting upload of '{}'", file.name);
        self.phase = SubmissionPhase::Submitting;
        self.submit = SubmitControl {
            enabled: false,
            label: SUBMIT_BUSY_LABEL,
        };
        self.progress_hide_at = None;
        self.set_progress(0);
        self.show_message("📤 Video upload started...", StatusKind::Info, now);

        Ok(UploadJob {
            file,
            fields: self.fields.clone(),
        })
    }

    pub fn request_dispatched(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            self.phase = SubmissionPhase::AwaitingResponse;
        }
    }

    pub fn apply_event(&mut self, event: UploadEvent, now: Instant) {
        if !self.phase.is_in_flight() {
            debug!("Ignoring upload event outside a submission: {:?}", event);
            return;
        }

        match event {
            UploadEvent::Progress { sent, total } => {
                self.phase = SubmissionPhase::AwaitingResponse;
                let Some(percent) = progress_percent(sent, total) else {
                    return;
                };
                self.set_progress(percent);
                if percent < 100 {
                    self.show_message(
                        format!("📤 Uploading... {}%", percent),
                        StatusKind::Info,
                        now,
                    );
                }
            }
            UploadEvent::Finished(outcome) => self.finish(outcome, now),
        }
    }

    fn finish(&mut self, outcome: UploadOutcome, now: Instant) {
        let message = match outcome {
            UploadOutcome::Succeeded(result) => {
                self.hand_off(&result);
                self.phase = SubmissionPhase::Succeeded;
                self.set_progress(100);
                self.show_message(
                    "✅ Video uploaded to YouTube successfully!",
                    StatusKind::Success,
                    now,
                );
                self.navigate_at = Some(now + self.navigate_after);
                return;
            }
            UploadOutcome::Rejected(reason) => format!("❌ Upload error: {}", reason),
            UploadOutcome::Malformed => "❌ Failed to process the server response.".to_string(),
            UploadOutcome::ServerError {
                message: Some(message),
                ..
            } => format!("❌ Error: {}", message),
            UploadOutcome::ServerError {
                status,
                message: None,
            } => format!("❌ Server error: {}", status),
            UploadOutcome::Transport(_) => {
                "❌ An error occurred during upload. Please try again.".to_string()
            }
            UploadOutcome::ClientError(reason) => format!("❌ Error: {}", reason),
        };

        self.phase = SubmissionPhase::Failed;
        self.show_message(message, StatusKind::Error, now);
        self.submit = SubmitControl::default();
        self.progress_hide_at = Some(now + self.progress_hide_after);
    }

    fn hand_off(&mut self, result: &UploadResult) {
        // Keys absent from this response must not survive from an earlier upload.
        if let Err(e) = self.store.clear() {
            error!("Failed to clear the previous upload result: {}", e);
        }

        let mut entries: Vec<(&str, String)> = [
            (KEY_VIDEO_ID, &result.video_id),
            (KEY_VIDEO_LINK, &result.video_link),
            (KEY_VIDEO_TYPE, &result.video_type),
            (KEY_PRIVACY, &result.privacy),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|value| (key, value)))
        .collect();

        if let Some(analysis) = &result.analysis {
            entries.push((KEY_ANALYSIS, analysis.to_string()));
        }

        for (key, value) in entries {
            if let Err(e) = self.store.set_item(key, &value) {
                error!("Failed to store '{}' for the result page: {}", key, e);
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);

        if matches!(self.progress_hide_at, Some(at) if now >= at) {
            self.progress.visible = false;
            self.progress_hide_at = None;
        }

        if matches!(self.navigate_at, Some(at) if now >= at) {
            self.navigate_at = None;
            if let Err(e) = self.navigator.navigate(&self.result_url) {
                error!("{}", e);
                self.show_message(
                    format!("❌ Could not open the result page: {}", self.result_url),
                    StatusKind::Error,
                    now,
                );
            }
            // The form has been handed off; start over for the next video.
            self.phase = SubmissionPhase::Idle;
            self.submit = SubmitControl::default();
            self.progress.visible = false;
            self.selected_file = None;
            self.file_info = None;
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [self.status.deadline(), self.progress_hide_at, self.navigate_at]
            .into_iter()
            .flatten()
            .min()
    }

    /// Returns `false` without touching anything while busy.
    pub fn reset(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }

        info!("Resetting upload form");
        self.fields = UploadFormFields::default();
        self.selected_file = None;
        self.file_info = None;
        self.drop_active = false;
        self.status.clear();
        self.progress = ProgressState::default();
        self.progress_hide_at = None;
        self.submit = SubmitControl::default();
        self.phase = SubmissionPhase::Idle;
        true
    }
}
