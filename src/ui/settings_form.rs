//! Editable copy of [`Settings`] behind the settings screen.

use crate::i18n::Language;
use crate::settings::{Settings, MAX_DIGITS, MAX_DISPLAY_SECS, MIN_DIGITS, MIN_DISPLAY_SECS};

/// Session lengths offered on the settings screen.
pub const EXAMPLE_CHOICES: [u32; 5] = [5, 10, 20, 50, 100];
pub const MAX_SERIES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Digits,
    DisplayTime,
    Examples,
    Series,
    Range10To19,
    Round10To90,
    Round100To900,
    Language,
    Sound,
}

impl SettingsField {
    pub const ALL: [SettingsField; 9] = [
        SettingsField::Digits,
        SettingsField::DisplayTime,
        SettingsField::Examples,
        SettingsField::Series,
        SettingsField::Range10To19,
        SettingsField::Round10To90,
        SettingsField::Round100To900,
        SettingsField::Language,
        SettingsField::Sound,
    ];

    pub fn label_key(&self) -> &'static str {
        match self {
            SettingsField::Digits => "settings.digitsLabel",
            SettingsField::DisplayTime => "settings.timeLabel",
            SettingsField::Examples => "settings.totalExamplesLabel",
            SettingsField::Series => "settings.seriesCountLabel",
            SettingsField::Range10To19 => "settings.range10_19Label",
            SettingsField::Round10To90 => "settings.round10_90Label",
            SettingsField::Round100To900 => "settings.round100_900Label",
            SettingsField::Language => "settings.languageLabel",
            SettingsField::Sound => "settings.soundLabel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    draft: Settings,
    focus: usize,
}

impl SettingsForm {
    pub fn new(settings: Settings) -> Self {
        Self {
            draft: settings,
            focus: 0,
        }
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    pub fn focus(&self) -> SettingsField {
        SettingsField::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % SettingsField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        let len = SettingsField::ALL.len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn increase(&mut self) {
        self.step(true);
    }

    pub fn decrease(&mut self) {
        self.step(false);
    }

    fn step(&mut self, up: bool) {
        let field = self.focus();
        let draft = &mut self.draft;
        match field {
            SettingsField::Digits => {
                draft.digit_count = if up {
                    draft.digit_count.saturating_add(1).min(MAX_DIGITS)
                } else {
                    draft.digit_count.saturating_sub(1).max(MIN_DIGITS)
                };
            }
            SettingsField::DisplayTime => {
                // tenths of a second, so repeated steps do not drift
                let tenths = (draft.display_time_secs * 10.0).round() + if up { 1.0 } else { -1.0 };
                draft.display_time_secs =
                    (tenths / 10.0).clamp(MIN_DISPLAY_SECS, MAX_DISPLAY_SECS);
            }
            SettingsField::Examples => {
                let current = draft.total_examples;
                let choice = if up {
                    EXAMPLE_CHOICES.iter().find(|&&n| n > current)
                } else {
                    EXAMPLE_CHOICES.iter().rev().find(|&&n| n < current)
                };
                if let Some(&n) = choice {
                    draft.total_examples = n;
                }
            }
            SettingsField::Series => {
                if up && draft.series_count < MAX_SERIES {
                    draft.series_count += 1;
                } else if !up && draft.series_count > 1 {
                    draft.series_count -= 1;
                }
            }
            SettingsField::Range10To19 => toggle(&mut draft.number_ranges.range_10_19),
            SettingsField::Round10To90 => toggle(&mut draft.number_ranges.round_10_90),
            SettingsField::Round100To900 => toggle(&mut draft.number_ranges.round_100_900),
            SettingsField::Language => draft.language = cycle(draft.language, up),
            SettingsField::Sound => toggle(&mut draft.sound),
        }
    }
}

fn toggle(flag: &mut bool) {
    *flag = !*flag;
}

fn cycle(language: Language, forward: bool) -> Language {
    let all = Language::ALL;
    let i = all.iter().position(|&l| l == language).unwrap_or(0);
    let next = if forward {
        (i + 1) % all.len()
    } else {
        (i + all.len() - 1) % all.len()
    };
    all[next]
}
