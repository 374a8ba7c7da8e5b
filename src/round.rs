//! Round controller: the phase state machine of a training session.
//!
//! Each round runs PREPARE -> DISPLAY -> INPUT -> FEEDBACK. The controller
//! owns the phase and at most one pending timer id. It never sleeps or
//! renders: every call takes an [`Event`] and returns the [`Effect`]s the
//! caller must carry out, including scheduling and cancelling the timer.
//! A `TimerFired` whose id is not the pending one is stale and ignored.

use rand::rngs::StdRng;
use std::time::Duration;

use crate::collaborators::{Cue, NoticeKind};
use crate::error::{AnswerError, ConfigError, TrainerError};
use crate::number_pool::{generate_number, generate_series};
use crate::session::{SessionResults, SessionState};
use crate::settings::Settings;
use crate::validation::{validate_answer, Answer};

pub const PREPARE_DELAY: Duration = Duration::from_secs(2);
pub const SERIES_GAP: Duration = Duration::from_millis(500);
pub const SUCCESS_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TimerFired(TimerId),
    /// One value per answer field
    Submit(Vec<String>),
    ShowAgain,
    /// Continue or skip after feedback
    Continue,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Prepare,
    Watch,
    Answer { fields: usize },
    Correct,
    Incorrect { expected: Vec<u32> },
}

impl Prompt {
    pub fn message_key(&self) -> &'static str {
        match self {
            Prompt::Prepare => "game.prepare",
            Prompt::Watch => "game.watch",
            Prompt::Answer { fields } if *fields > 1 => "game.seriesAnswerPrompt",
            Prompt::Answer { .. } => "game.answerPrompt",
            Prompt::Correct => "game.correct",
            Prompt::Incorrect { .. } => "game.incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Show(u32),
    Hide,
    Prompt(Prompt),
    Notify { kind: NoticeKind, key: &'static str },
    PlayCue(Cue),
    ScheduleTimer { id: TimerId, delay: Duration },
    CancelTimer(TimerId),
    Destroy,
    SessionComplete(SessionResults),
}

/// Position while revealing the values of a round one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub index: usize,
    /// In the blank pause after `index`
    pub gap: bool,
}

impl Reveal {
    pub const FIRST: Reveal = Reveal {
        index: 0,
        gap: false,
    };

    fn next(self, len: usize) -> Option<Reveal> {
        if self.gap {
            Some(Reveal {
                index: self.index + 1,
                gap: false,
            })
        } else if self.index + 1 < len {
            Some(Reveal {
                index: self.index,
                gap: true,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Failure { replay: Option<Reveal> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Prepare,
    Display(Reveal),
    Input,
    Feedback(Feedback),
    Complete,
    Exited,
}

#[derive(Debug)]
pub struct RoundController {
    settings: Settings,
    session: SessionState,
    phase: Phase,
    timer: Option<TimerId>,
    next_timer_id: u64,
    rng: StdRng,
}

impl RoundController {
    pub fn new(settings: Settings, rng: StdRng) -> Self {
        Self {
            settings,
            session: SessionState::default(),
            phase: Phase::Ready,
            timer: None,
            next_timer_id: 0,
            rng,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings for the next `start`; a running session keeps its own.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Begin a new session, discarding any previous one.
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.cancel_timer(&mut effects);
        self.session = SessionState::start(&self.settings);
        self.enter_prepare(&mut effects);
        effects
    }

    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, TrainerError> {
        let mut effects = Vec::new();
        match event {
            Event::TimerFired(id) => self.on_timer(id, &mut effects)?,
            Event::Submit(values) => self.on_submit(&values, &mut effects),
            Event::ShowAgain => self.on_show_again(&mut effects),
            Event::Continue => self.on_continue(&mut effects),
            Event::Exit => self.exit(&mut effects),
        }
        Ok(effects)
    }

    fn on_timer(&mut self, id: TimerId, effects: &mut Vec<Effect>) -> Result<(), TrainerError> {
        if self.timer != Some(id) {
            tracing::debug!("stale timer {id:?} ignored");
            return Ok(());
        }
        self.timer = None;

        let len = self.session.round_values().len();
        match self.phase {
            Phase::Prepare => self.enter_display(effects)?,
            Phase::Display(reveal) => match reveal.next(len) {
                Some(next) => {
                    self.phase = Phase::Display(next);
                    self.play(next, effects);
                }
                None => self.enter_input(effects),
            },
            Phase::Feedback(Feedback::Success) => self.advance(effects),
            Phase::Feedback(Feedback::Failure {
                replay: Some(reveal),
            }) => match reveal.next(len) {
                Some(next) => {
                    self.phase = Phase::Feedback(Feedback::Failure { replay: Some(next) });
                    self.play(next, effects);
                }
                None => {
                    self.phase = Phase::Feedback(Feedback::Failure { replay: None });
                    effects.push(Effect::Hide);
                }
            },
            phase => tracing::debug!("timer fired in {phase:?}; nothing to do"),
        }
        Ok(())
    }

    fn on_submit(&mut self, values: &[String], effects: &mut Vec<Effect>) {
        if self.phase != Phase::Input {
            tracing::debug!("submission in {:?} ignored", self.phase);
            return;
        }

        let expected = self.session.round_values();
        let answers = match check_submission(values, &expected) {
            Ok(answers) => answers,
            Err(reason) => {
                effects.push(Effect::Notify {
                    kind: NoticeKind::Error,
                    key: reason.message_key(),
                });
                return;
            }
        };

        let correct = answers.iter().filter(|a| a.outcome.is_correct()).count();
        match answers.as_slice() {
            [answer] if !self.settings.is_series() => {
                self.session.record_single_answer(answer.value, answer.outcome)
            }
            _ => {
                let values: Vec<i64> = answers.iter().map(|a| a.value).collect();
                self.session.record_series_answers(&values, correct as u32);
            }
        }
        let all_correct = correct == answers.len();
        tracing::info!(
            "answer {:?}, expected {:?}, correct {}/{}",
            self.session.last_answers,
            expected,
            correct,
            answers.len()
        );

        self.enter_feedback(all_correct, expected, effects);
    }

    fn on_show_again(&mut self, effects: &mut Vec<Effect>) {
        if self.phase != Phase::Feedback(Feedback::Failure { replay: None }) {
            tracing::debug!("show again in {:?} ignored", self.phase);
            return;
        }
        self.phase = Phase::Feedback(Feedback::Failure {
            replay: Some(Reveal::FIRST),
        });
        self.play(Reveal::FIRST, effects);
    }

    fn on_continue(&mut self, effects: &mut Vec<Effect>) {
        if !matches!(self.phase, Phase::Feedback(_)) {
            tracing::debug!("continue in {:?} ignored", self.phase);
            return;
        }
        self.cancel_timer(effects);
        self.advance(effects);
    }

    fn exit(&mut self, effects: &mut Vec<Effect>) {
        if self.phase == Phase::Exited {
            return;
        }
        self.cancel_timer(effects);
        self.phase = Phase::Exited;
        effects.push(Effect::Destroy);
        tracing::info!(
            "session exited at example {}",
            self.session.current_example_index + 1
        );
    }

    fn enter_prepare(&mut self, effects: &mut Vec<Effect>) {
        self.phase = Phase::Prepare;
        tracing::debug!(
            "round {} of {}: prepare",
            self.session.current_example_index + 1,
            self.session.total_examples()
        );
        effects.push(Effect::Hide);
        effects.push(Effect::Prompt(Prompt::Prepare));
        effects.push(Effect::PlayCue(Cue::Tick));
        self.schedule(PREPARE_DELAY, effects);
    }

    fn enter_display(&mut self, effects: &mut Vec<Effect>) -> Result<(), TrainerError> {
        if let Err(e) = self.generate_round() {
            tracing::error!("cannot generate numbers: {e}");
            self.phase = Phase::Exited;
            return Err(e.into());
        }
        tracing::debug!("display: {:?}", self.session.round_values());

        effects.push(Effect::Prompt(Prompt::Watch));
        self.phase = Phase::Display(Reveal::FIRST);
        self.play(Reveal::FIRST, effects);
        Ok(())
    }

    fn generate_round(&mut self) -> Result<(), ConfigError> {
        let s = &self.settings;
        if s.is_series() {
            let series = generate_series(
                s.digit_count,
                s.series_count as usize,
                &s.number_ranges,
                &mut self.rng,
            )?;
            self.session.set_current_series(series);
        } else {
            let number = generate_number(s.digit_count, &s.number_ranges, &mut self.rng)?;
            self.session.set_current_number(number);
        }
        Ok(())
    }

    fn enter_input(&mut self, effects: &mut Vec<Effect>) {
        self.phase = Phase::Input;
        tracing::debug!("input phase");
        effects.push(Effect::Hide);
        effects.push(Effect::Prompt(Prompt::Answer {
            fields: self.session.round_values().len(),
        }));
    }

    fn enter_feedback(&mut self, all_correct: bool, expected: Vec<u32>, effects: &mut Vec<Effect>) {
        if all_correct {
            self.phase = Phase::Feedback(Feedback::Success);
            effects.push(Effect::Prompt(Prompt::Correct));
            effects.push(Effect::PlayCue(Cue::Correct));
            self.schedule(SUCCESS_DELAY, effects);
        } else {
            // no auto-advance: the learner has to continue or skip
            self.phase = Phase::Feedback(Feedback::Failure { replay: None });
            effects.push(Effect::Prompt(Prompt::Incorrect { expected }));
            effects.push(Effect::PlayCue(Cue::Wrong));
        }
    }

    fn advance(&mut self, effects: &mut Vec<Effect>) {
        if self.session.is_finished() {
            self.session.end();
            self.phase = Phase::Complete;
            let results = self.session.results();
            tracing::info!(
                "session complete: {}/{} correct, {}%",
                results.correct,
                results.total,
                results.accuracy_percent
            );
            effects.push(Effect::Hide);
            effects.push(Effect::SessionComplete(results));
        } else {
            effects.push(Effect::PlayCue(Cue::Next));
            self.enter_prepare(effects);
        }
    }

    fn play(&mut self, reveal: Reveal, effects: &mut Vec<Effect>) {
        if reveal.gap {
            effects.push(Effect::Hide);
            self.schedule(SERIES_GAP, effects);
            return;
        }
        if let Some(value) = self.session.round_values().get(reveal.index) {
            effects.push(Effect::Show(*value));
        }
        let delay = self.settings.display_time();
        self.schedule(delay, effects);
    }

    fn schedule(&mut self, delay: Duration, effects: &mut Vec<Effect>) {
        self.cancel_timer(effects);
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timer = Some(id);
        effects.push(Effect::ScheduleTimer { id, delay });
    }

    fn cancel_timer(&mut self, effects: &mut Vec<Effect>) {
        if let Some(id) = self.timer.take() {
            effects.push(Effect::CancelTimer(id));
        }
    }
}

/// Validate every field; the first failing field rejects the whole submission.
fn check_submission(values: &[String], expected: &[u32]) -> Result<Vec<Answer>, AnswerError> {
    if values.len() > expected.len() {
        return Err(AnswerError::InvalidFormat);
    }
    expected
        .iter()
        .enumerate()
        .map(|(i, &e)| validate_answer(values.get(i).map(String::as_str).unwrap_or(""), e))
        .collect()
}
