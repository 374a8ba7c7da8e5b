use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use std::time::Duration;

use crate::collaborators::{CueSink, Localizer, NoticeKind};
use crate::error::TrainerError;
use crate::i18n::Dictionary;
use crate::round::{Feedback, Phase};
use crate::settings::{Settings, SettingsStore};
use crate::trainer::Trainer;
use crate::ui::display::TerminalDisplay;
use crate::ui::settings_form::{SettingsField, SettingsForm};
use crate::ui::status::StatusCues;

pub type TerminalTrainer = Trainer<TerminalDisplay, StatusCues, Dictionary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Training,
    Results,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    Quit,
}

pub struct App {
    pub trainer: TerminalTrainer,
    pub state: AppState,
    pub settings_form: SettingsForm,
    store: Option<Box<dyn SettingsStore>>,
}

fn collaborators(settings: &Settings) -> (TerminalDisplay, StatusCues, Dictionary) {
    (
        TerminalDisplay::new(usize::from(settings.digit_count)),
        StatusCues::new(settings.sound),
        Dictionary::new(settings.language),
    )
}

impl App {
    pub fn new(settings: Settings, rng: StdRng) -> Self {
        let (display, cues, dictionary) = collaborators(&settings);
        Self {
            settings_form: SettingsForm::new(settings.clone()),
            trainer: Trainer::new(settings, rng, display, cues, dictionary),
            state: AppState::Training,
            store: None,
        }
    }

    /// Persist settings confirmed on the settings screen through `store`.
    pub fn with_store(mut self, store: Box<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Start (or restart) a session with the same settings.
    pub fn start(&mut self) {
        self.trainer.start();
        self.state = AppState::Training;
    }

    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.trainer.localizer().translate(key, params)
    }

    /// Show a localized toast outside the trainer's own notices.
    pub fn notice(&mut self, kind: NoticeKind, key: &str) {
        let message = self.translate(key, &[]);
        self.trainer.cues_mut().notify(kind, &message);
    }

    /// Let simulated time pass for the trainer and the toast line.
    pub fn on_elapsed(&mut self, elapsed: Duration) -> Result<(), TrainerError> {
        self.trainer.cues_mut().tick(elapsed);
        self.trainer.advance(elapsed)?;
        self.sync_state();
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<Flow, TrainerError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.trainer.exit()?;
            return Ok(Flow::Quit);
        }

        let flow = match self.state {
            AppState::Training => self.on_training_key(key)?,
            AppState::Results => match key.code {
                KeyCode::Char('r') => {
                    self.start();
                    Flow::Running
                }
                KeyCode::Char('s') => {
                    self.open_settings();
                    Flow::Running
                }
                KeyCode::Char('q') | KeyCode::Esc => Flow::Quit,
                _ => Flow::Running,
            },
            AppState::Settings => {
                self.on_settings_key(key);
                Flow::Running
            }
        };
        self.sync_state();
        Ok(flow)
    }

    fn on_training_key(&mut self, key: KeyEvent) -> Result<Flow, TrainerError> {
        if key.code == KeyCode::Esc {
            self.trainer.exit()?;
            return Ok(Flow::Quit);
        }

        match self.trainer.phase() {
            Phase::Input => {
                let form = &mut self.trainer.display_mut().form;
                match key.code {
                    KeyCode::Char(c) => form.push(c),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Tab | KeyCode::Right => form.next_field(),
                    KeyCode::BackTab | KeyCode::Left => form.prev_field(),
                    KeyCode::Enter => {
                        let values = form.values();
                        self.trainer.submit(values)?;
                    }
                    _ => {}
                }
            }
            Phase::Feedback(Feedback::Failure { .. }) => match key.code {
                KeyCode::Char('a') => self.trainer.show_again()?,
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                    self.trainer.continue_round()?
                }
                _ => {}
            },
            Phase::Feedback(Feedback::Success) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.trainer.continue_round()?;
                }
            }
            _ => {}
        }
        Ok(Flow::Running)
    }

    fn open_settings(&mut self) {
        self.settings_form = SettingsForm::new(self.trainer.settings().clone());
        self.state = AppState::Settings;
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        let form = &mut self.settings_form;
        match key.code {
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left | KeyCode::Char('-') => form.decrease(),
            KeyCode::Right | KeyCode::Char('+') => form.increase(),
            KeyCode::Char(' ') => match form.focus() {
                SettingsField::Digits
                | SettingsField::DisplayTime
                | SettingsField::Examples
                | SettingsField::Series => {}
                _ => form.increase(),
            },
            KeyCode::Enter => self.confirm_settings(),
            KeyCode::Esc => self.state = AppState::Results,
            _ => {}
        }
    }

    /// Apply the edited settings, save them if they changed, and start a
    /// session with them.
    fn confirm_settings(&mut self) {
        let settings = self.settings_form.draft().clone();
        if let Err(e) = settings.validate() {
            tracing::warn!("settings rejected: {e}");
            self.notice(NoticeKind::Error, "settings.invalid");
            return;
        }

        let changed = settings != *self.trainer.settings();
        let saved = match (&self.store, changed) {
            (Some(store), true) => store.save(&settings).map_err(|e| {
                tracing::warn!("settings not saved: {e}");
            }),
            _ => Ok(()),
        };
        tracing::info!("applying settings {settings:?}");

        let (display, cues, dictionary) = collaborators(&settings);
        self.trainer.reconfigure(settings, display, cues, dictionary);
        if saved.is_err() {
            self.notice(NoticeKind::Warning, "settings.saveFailed");
        }
        self.start();
    }

    fn sync_state(&mut self) {
        if self.state == AppState::Training && self.trainer.phase() == Phase::Complete {
            self.state = AppState::Results;
        }
    }
}
