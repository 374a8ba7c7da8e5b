use chrono::{DateTime, Local};

use crate::settings::Settings;
use crate::validation::Outcome;

/// Scores and round data of one training session.
///
/// A series round counts as a single example toward `total_examples`, while
/// its correct/incorrect counters move once per item.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_example_index: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub current_number: Option<u32>,
    pub current_series: Vec<u32>,
    pub last_answers: Vec<i64>,
    pub started_at: Option<DateTime<Local>>,
    pub ended_at: Option<DateTime<Local>>,
    total_examples: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResults {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub duration_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    NeedsPractice,
}

impl Verdict {
    pub fn from_accuracy(accuracy_percent: u32) -> Self {
        if accuracy_percent >= 80 {
            Verdict::Excellent
        } else if accuracy_percent >= 50 {
            Verdict::Good
        } else {
            Verdict::NeedsPractice
        }
    }

    pub fn message_key(&self) -> &'static str {
        match self {
            Verdict::Excellent => "results.excellent",
            Verdict::Good => "results.good",
            Verdict::NeedsPractice => "results.needPractice",
        }
    }
}

impl SessionResults {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_accuracy(self.accuracy_percent)
    }
}

impl SessionState {
    /// Fresh counters, stamped with the current time.
    pub fn start(settings: &Settings) -> Self {
        tracing::info!("session started: {} examples", settings.total_examples);
        Self {
            total_examples: settings.total_examples,
            started_at: Some(Local::now()),
            ..Self::default()
        }
    }

    pub fn total_examples(&self) -> u32 {
        self.total_examples
    }

    pub fn set_current_number(&mut self, number: u32) {
        self.current_number = Some(number);
        self.current_series.clear();
    }

    pub fn set_current_series(&mut self, series: Vec<u32>) {
        self.current_number = None;
        self.current_series = series;
    }

    /// Values of the active round in display order.
    pub fn round_values(&self) -> Vec<u32> {
        match self.current_number {
            Some(n) => vec![n],
            None => self.current_series.clone(),
        }
    }

    pub fn record_single_answer(&mut self, value: i64, outcome: Outcome) {
        if self.is_finished() {
            tracing::warn!("answer {value} recorded after the last example; ignored");
            return;
        }
        self.last_answers = vec![value];
        match outcome {
            Outcome::Correct => self.correct_count += 1,
            Outcome::Incorrect => self.incorrect_count += 1,
        }
        self.current_example_index += 1;
        tracing::debug!("answer recorded: {value} ({outcome:?})");
    }

    pub fn record_series_answers(&mut self, values: &[i64], correct: u32) {
        if self.is_finished() {
            tracing::warn!("series answers recorded after the last example; ignored");
            return;
        }
        let correct = correct.min(values.len() as u32);
        self.last_answers = values.to_vec();
        self.correct_count += correct;
        self.incorrect_count += values.len() as u32 - correct;
        self.current_example_index += 1;
        tracing::debug!(
            "series answers recorded: {correct} of {} correct",
            values.len()
        );
    }

    pub fn is_finished(&self) -> bool {
        self.current_example_index >= self.total_examples
    }

    pub fn end(&mut self) {
        self.ended_at = Some(Local::now());
        tracing::info!("session ended");
    }

    pub fn results(&self) -> SessionResults {
        let total = self.correct_count + self.incorrect_count;
        let accuracy_percent = if total > 0 {
            (f64::from(self.correct_count) / f64::from(total) * 100.0).round() as u32
        } else {
            0
        };
        let duration_secs = match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => {
                ((end - start).num_milliseconds().max(0) as f64 / 1000.0).round() as u64
            }
            _ => 0,
        };

        SessionResults {
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            total,
            accuracy_percent,
            duration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn session(total_examples: u32) -> SessionState {
        SessionState::start(&Settings {
            total_examples,
            ..Settings::default()
        })
    }

    #[test]
    fn start_resets_counters_and_stamps_time() {
        let s = session(5);
        assert_eq!(s.current_example_index, 0);
        assert_eq!(s.correct_count, 0);
        assert_eq!(s.incorrect_count, 0);
        assert!(s.started_at.is_some());
        assert!(s.ended_at.is_none());
        assert_eq!(s.total_examples(), 5);
    }

    #[test]
    fn finishes_exactly_after_total_examples() {
        let mut s = session(3);
        for i in 0..3 {
            assert!(!s.is_finished(), "finished early at {i}");
            s.record_single_answer(i, Outcome::Correct);
        }
        assert!(s.is_finished());
    }

    #[test]
    fn single_answers_move_matching_counter() {
        let mut s = session(4);
        s.record_single_answer(1, Outcome::Correct);
        s.record_single_answer(2, Outcome::Incorrect);
        s.record_single_answer(3, Outcome::Incorrect);
        assert_eq!(s.correct_count, 1);
        assert_eq!(s.incorrect_count, 2);
        assert_eq!(s.current_example_index, 3);
        assert_eq!(s.last_answers, vec![3]);
    }

    #[test]
    fn series_counts_as_one_example() {
        let mut s = session(5);
        s.record_series_answers(&[1, 2, 3], 2);
        assert_eq!(s.current_example_index, 1);
        assert_eq!(s.correct_count, 2);
        assert_eq!(s.incorrect_count, 1);
    }

    #[test]
    fn recording_after_finish_is_ignored() {
        let mut s = session(1);
        s.record_single_answer(1, Outcome::Correct);
        s.record_single_answer(2, Outcome::Incorrect);
        s.record_series_answers(&[1, 2], 0);
        assert_eq!(s.current_example_index, 1);
        assert_eq!(s.correct_count + s.incorrect_count, 1);
    }

    #[test]
    fn results_accuracy_is_rounded() {
        let mut s = session(3);
        s.record_single_answer(1, Outcome::Correct);
        s.record_single_answer(1, Outcome::Correct);
        s.record_single_answer(1, Outcome::Incorrect);
        let r = s.results();
        assert_eq!(r.correct, 2);
        assert_eq!(r.incorrect, 1);
        assert_eq!(r.total, 3);
        assert_eq!(r.accuracy_percent, 67);
        assert_eq!(r.verdict(), Verdict::Good);
    }

    #[test]
    fn results_without_answers() {
        let r = session(3).results();
        assert_eq!(r.total, 0);
        assert_eq!(r.accuracy_percent, 0);
        assert_eq!(r.duration_secs, 0);
        assert_eq!(r.verdict(), Verdict::NeedsPractice);
    }

    #[test]
    fn duration_is_rounded_seconds() {
        let mut s = session(1);
        let start = Local::now();
        s.started_at = Some(start);
        s.ended_at = Some(start + ChronoDuration::milliseconds(12_600));
        assert_eq!(s.results().duration_secs, 13);
    }

    #[test]
    fn round_values_follow_mode() {
        let mut s = session(2);
        s.set_current_number(57);
        assert_eq!(s.round_values(), vec![57]);
        s.set_current_series(vec![1, 2, 3]);
        assert_eq!(s.current_number, None);
        assert_eq!(s.round_values(), vec![1, 2, 3]);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::from_accuracy(100), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(80), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(79), Verdict::Good);
        assert_eq!(Verdict::from_accuracy(50), Verdict::Good);
        assert_eq!(Verdict::from_accuracy(49), Verdict::NeedsPractice);
        assert_eq!(Verdict::NeedsPractice.message_key(), "results.needPractice");
    }
}
