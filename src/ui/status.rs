use std::time::Duration;

use crate::collaborators::{Cue, CueSink, NoticeKind};

pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: String,
    remaining: Duration,
}

/// Toast line and sound cues for the terminal. Sound is the terminal bell,
/// rung for a wrong answer when enabled.
#[derive(Debug, Clone, Default)]
pub struct StatusCues {
    sound: bool,
    toast: Option<Toast>,
    bell: bool,
    last_cue: Option<Cue>,
}

impl StatusCues {
    pub fn new(sound: bool) -> Self {
        Self {
            sound,
            ..Self::default()
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn last_cue(&self) -> Option<Cue> {
        self.last_cue
    }

    /// Age the toast; it disappears once its time is up.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(toast) = self.toast.as_mut() {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
            if toast.remaining.is_zero() {
                self.toast = None;
            }
        }
    }

    /// True once per bell request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }
}

impl CueSink for StatusCues {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        tracing::debug!("{kind} notice: {message}");
        self.toast = Some(Toast {
            kind,
            message: message.to_string(),
            remaining: TOAST_DURATION,
        });
    }

    fn play_cue(&mut self, cue: Cue) {
        tracing::debug!("cue {cue}");
        self.last_cue = Some(cue);
        if self.sound && cue == Cue::Wrong {
            self.bell = true;
        }
    }
}
