//! File intake from drag-and-drop and the native picker.
//!
//! Both sources are behind traits so tests can feed files without system
//! dialogs or window events.

use crate::upload::validation::VIDEO_EXTENSIONS;
use crate::upload::{IntakeError, SelectedFile};
use eframe::egui;
use rfd::FileDialog;
use tracing::debug;

pub trait DropHandler {
    /// Whether files are being dragged over the window this frame.
    fn is_hovering(&self, ctx: &egui::Context) -> bool;

    /// The first file dropped this frame. Any further files are ignored.
    fn take_dropped(&self, ctx: &egui::Context) -> Option<Result<SelectedFile, IntakeError>>;
}

pub trait FilePicker {
    fn pick_video(&self) -> Option<Result<SelectedFile, IntakeError>>;
}

#[derive(Default)]
pub struct SystemDropHandler;

impl DropHandler for SystemDropHandler {
    fn is_hovering(&self, ctx: &egui::Context) -> bool {
        ctx.input(|i| !i.raw.hovered_files.is_empty())
    }

    fn take_dropped(&self, ctx: &egui::Context) -> Option<Result<SelectedFile, IntakeError>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.len() > 1 {
            debug!("dropped_files={}, using the first", dropped.len());
        }
        dropped.first().map(selected_from_dropped)
    }
}

fn selected_from_dropped(file: &egui::DroppedFile) -> Result<SelectedFile, IntakeError> {
    let Some(path) = &file.path else {
        return Err(IntakeError::Unreadable {
            name: file.name.clone(),
            reason: "no local path".to_string(),
        });
    };

    let mime = Some(file.mime.clone()).filter(|m| !m.is_empty());
    SelectedFile::from_path(path.clone(), mime).map_err(|e| IntakeError::unreadable(path, e))
}

#[derive(Default)]
pub struct SystemFilePicker;

impl FilePicker for SystemFilePicker {
    fn pick_video(&self) -> Option<Result<SelectedFile, IntakeError>> {
        let path = FileDialog::new()
            .add_filter("Video", &VIDEO_EXTENSIONS)
            .set_title("Select a video")
            .pick_file()?;

        debug!("User picked {:?}", path);
        let selected = SelectedFile::from_path(path.clone(), None);
        Some(selected.map_err(|e| IntakeError::unreadable(&path, e)))
    }
}
