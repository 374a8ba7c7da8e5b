//! Drives a [`RoundController`]: carries out its effects against the
//! collaborators and feeds it timer events as simulated time passes.

use rand::rngs::StdRng;
use std::time::Duration;

use crate::collaborators::{CueSink, DisplayAdapter, Localizer, NoticeKind};
use crate::error::TrainerError;
use crate::round::{Effect, Event, Phase, Prompt, RoundController};
use crate::session::{SessionResults, SessionState};
use crate::settings::Settings;
use crate::timer::PhaseTimer;
use crate::validation::format_number;

pub struct Trainer<D, C, L> {
    controller: RoundController,
    timer: PhaseTimer,
    display: D,
    cues: C,
    localizer: L,
    results: Option<SessionResults>,
}

impl<D: DisplayAdapter, C: CueSink, L: Localizer> Trainer<D, C, L> {
    pub fn new(settings: Settings, rng: StdRng, display: D, cues: C, localizer: L) -> Self {
        Self {
            controller: RoundController::new(settings, rng),
            timer: PhaseTimer::new(),
            display,
            cues,
            localizer,
            results: None,
        }
    }

    pub fn start(&mut self) {
        self.results = None;
        let effects = self.controller.start();
        self.apply(effects);
    }

    /// Swap settings and collaborators between sessions. The number
    /// generator carries over, so a seeded run stays reproducible.
    pub fn reconfigure(&mut self, settings: Settings, display: D, cues: C, localizer: L) {
        self.timer.clear();
        self.controller.set_settings(settings);
        self.display = display;
        self.cues = cues;
        self.localizer = localizer;
        self.results = None;
    }

    pub fn submit(&mut self, values: Vec<String>) -> Result<(), TrainerError> {
        self.dispatch(Event::Submit(values))
    }

    pub fn show_again(&mut self) -> Result<(), TrainerError> {
        self.dispatch(Event::ShowAgain)
    }

    /// Continue, or skip, after feedback.
    pub fn continue_round(&mut self) -> Result<(), TrainerError> {
        self.dispatch(Event::Continue)
    }

    pub fn exit(&mut self) -> Result<(), TrainerError> {
        self.dispatch(Event::Exit)
    }

    /// Let `elapsed` pass, firing every timer that falls due in the meantime.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), TrainerError> {
        let mut elapsed = elapsed;
        while let Some((id, leftover)) = self.timer.advance(elapsed) {
            self.dispatch(Event::TimerFired(id))?;
            elapsed = leftover;
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn session(&self) -> &SessionState {
        self.controller.session()
    }

    pub fn settings(&self) -> &Settings {
        self.controller.settings()
    }

    pub fn results(&self) -> Option<SessionResults> {
        self.results
    }

    /// Time until the pending timer fires, if one is armed.
    pub fn time_to_next_timer(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    fn dispatch(&mut self, event: Event) -> Result<(), TrainerError> {
        match self.controller.handle(event) {
            Ok(effects) => {
                self.apply(effects);
                Ok(())
            }
            Err(e) => {
                tracing::error!("session aborted: {e}");
                self.timer.clear();
                let message = self.localizer.translate("errors.generic", &[]);
                self.cues.notify(NoticeKind::Error, &message);
                self.display.destroy();
                Err(e)
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Show(value) => self.display.show(value),
                Effect::Hide => self.display.hide(),
                Effect::Prompt(prompt) => {
                    let text = self.prompt_text(&prompt);
                    self.display.prompt(&prompt, &text);
                }
                Effect::Notify { kind, key } => {
                    let message = self.localizer.translate(key, &[]);
                    self.cues.notify(kind, &message);
                }
                Effect::PlayCue(cue) => self.cues.play_cue(cue),
                Effect::ScheduleTimer { id, delay } => self.timer.schedule(id, delay),
                Effect::CancelTimer(id) => self.timer.cancel(id),
                Effect::Destroy => self.display.destroy(),
                Effect::SessionComplete(results) => self.results = Some(results),
            }
        }
    }

    fn prompt_text(&self, prompt: &Prompt) -> String {
        let key = prompt.message_key();
        match prompt {
            Prompt::Answer { fields } => {
                let count = fields.to_string();
                self.localizer.translate(key, &[("count", count.as_str())])
            }
            Prompt::Incorrect { expected } => {
                let values: Vec<String> = expected.iter().map(|v| format_number(*v)).collect();
                format!(
                    "{} {} {}",
                    self.localizer.translate(key, &[]),
                    self.localizer.translate("game.correctWas", &[]),
                    values.join(", ")
                )
            }
            _ => self.localizer.translate(key, &[]),
        }
    }
}
