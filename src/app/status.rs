use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// The status line under the form. Non-info messages hide themselves after
/// `hide_after`; showing a new message replaces any pending hide.
#[derive(Debug, Clone)]
pub struct StatusLine {
    current: Option<StatusMessage>,
    visible: bool,
    hide_at: Option<Instant>,
    hide_after: Duration,
}

impl StatusLine {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            current: None,
            visible: false,
            hide_at: None,
            hide_after,
        }
    }

    pub fn show(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
        });
        self.visible = true;
        self.hide_at = match kind {
            StatusKind::Info => None,
            StatusKind::Success | StatusKind::Error => Some(now + self.hide_after),
        };
    }

    pub fn visible(&self) -> Option<&StatusMessage> {
        if self.visible {
            self.current.as_ref()
        } else {
            None
        }
    }

    /// Last message shown, whether or not it has been hidden since.
    pub fn last(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    pub fn tick(&mut self, now: Instant) {
        if matches!(self.hide_at, Some(at) if now >= at) {
            self.visible = false;
            self.hide_at = None;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.visible = false;
        self.hide_at = None;
    }
}
