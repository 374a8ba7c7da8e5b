//! Contracts between the round controller and the outside world.
//!
//! The core never touches a terminal, a speaker or a file; it talks to these
//! traits through the trainer. All calls are fire-and-forget.

use crate::round::Prompt;

/// Renders the abacus and the prompts of each phase.
pub trait DisplayAdapter {
    /// Show `value` on the abacus.
    fn show(&mut self, value: u32);
    fn hide(&mut self);
    /// `text` is the localized message for `prompt`.
    fn prompt(&mut self, prompt: &Prompt, text: &str);
    fn destroy(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Cue {
    Tick,
    Correct,
    Wrong,
    Next,
}

/// Toasts and sound cues.
pub trait CueSink {
    fn notify(&mut self, kind: NoticeKind, message: &str);
    fn play_cue(&mut self, cue: Cue);
}

/// User-facing strings, looked up by dotted key.
pub trait Localizer {
    /// `{name}` placeholders in the entry are filled from `params`.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}
