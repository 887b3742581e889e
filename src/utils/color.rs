use crate::app::status::StatusKind;
use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(204, 0, 0);
pub const INFO: Color32 = Color32::from_rgb(26, 115, 232);
pub const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
pub const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

pub fn status_color(kind: StatusKind) -> Color32 {
    match kind {
        StatusKind::Info => INFO,
        StatusKind::Success => SUCCESS,
        StatusKind::Error => ERROR,
    }
}
