pub mod intake;
mod state;
pub mod status;
mod ui;

use crate::config::UploaderConfig;
use crate::upload::{
    HandoffStore, JsonFileStore, MemoryStore, UploadEvent, UploadOutcome, VideoUploader,
};
use crate::utils::browser::{BrowserNavigator, Navigator};
use eframe::{egui, App};
use intake::{DropHandler, FilePicker, SystemDropHandler, SystemFilePicker};
pub use state::{
    progress_percent, FileInfo, ProgressState, SubmissionPhase, SubmitControl, UploadForm,
    SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};
use std::sync::mpsc as std_mpsc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct VideoUploaderApp {
    form: UploadForm,
    uploader: VideoUploader,
    event_receiver: Option<std_mpsc::Receiver<UploadEvent>>,
    drop_handler: Box<dyn DropHandler>,
    file_picker: Box<dyn FilePicker>,
}

impl VideoUploaderApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: UploaderConfig) -> Self {
        info!("Initializing video uploader, endpoint {}", config.upload_url);
        let store: Box<dyn HandoffStore> = match &config.handoff_file {
            Some(path) => {
                info!("Writing upload results to {}", path.display());
                Box::new(JsonFileStore::new(path.clone()))
            }
            None => Box::new(MemoryStore::new()),
        };

        Self::with_parts(
            &config,
            store,
            Box::new(BrowserNavigator),
            Box::new(SystemDropHandler),
            Box::new(SystemFilePicker),
        )
    }

    pub fn with_parts(
        config: &UploaderConfig,
        store: Box<dyn HandoffStore>,
        navigator: Box<dyn Navigator>,
        drop_handler: Box<dyn DropHandler>,
        file_picker: Box<dyn FilePicker>,
    ) -> Self {
        let mut form = UploadForm::new(config, store, navigator);
        form.reset();
        Self {
            form,
            uploader: VideoUploader::new(config.upload_url.clone()),
            event_receiver: None,
            drop_handler,
            file_picker,
        }
    }

    pub fn form(&self) -> &UploadForm {
        &self.form
    }

    pub fn open_picker(&mut self) {
        if let Some(file) = self.file_picker.pick_video() {
            let _ = self.form.intake(file, Instant::now());
        }
    }

    pub fn submit(&mut self) {
        let now = Instant::now();
        let job = match self.form.begin_submit(now) {
            Ok(job) => job,
            Err(e) => {
                warn!("Submit refused: {}", e);
                return;
            }
        };

        let (sender, receiver) = std_mpsc::channel();
        self.event_receiver = Some(receiver);
        self.uploader.clone().spawn(job, sender);
        self.form.request_dispatched();
    }

    fn handle_drops(&mut self, ctx: &egui::Context) {
        let hovering = self.drop_handler.is_hovering(ctx);
        if hovering && !self.form.is_drop_active() {
            self.form.drag_over();
        } else if !hovering && self.form.is_drop_active() {
            self.form.drag_leave();
        }

        if let Some(dropped) = self.drop_handler.take_dropped(ctx) {
            let _ = self.form.drop_file(Some(dropped), Instant::now());
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        self.handle_drops(ctx);

        if let Some(receiver) = &self.event_receiver {
            let mut finished = false;
            loop {
                match receiver.try_recv() {
                    Ok(event) => {
                        finished |= matches!(event, UploadEvent::Finished(_));
                        self.form.apply_event(event, Instant::now());
                    }
                    Err(std_mpsc::TryRecvError::Empty) => break,
                    Err(std_mpsc::TryRecvError::Disconnected) => {
                        if !finished {
                            warn!("Upload worker exited without a result");
                            self.form.apply_event(
                                UploadEvent::Finished(UploadOutcome::ClientError(
                                    "the upload stopped unexpectedly".to_string(),
                                )),
                                Instant::now(),
                            );
                        }
                        finished = true;
                        break;
                    }
                }
            }

            if finished {
                debug!("Upload worker finished");
                self.event_receiver = None;
            }
        }

        let now = Instant::now();
        self.form.tick(now);

        if self.form.phase().is_in_flight() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.form.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl App for VideoUploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
