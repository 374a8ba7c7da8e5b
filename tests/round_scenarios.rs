use std::time::Duration;

use abacus_flash::collaborators::{Cue, CueSink, DisplayAdapter, Localizer, NoticeKind};
use abacus_flash::round::{Feedback, Phase, Prompt};
use abacus_flash::session::SessionResults;
use abacus_flash::settings::{NumberRanges, Settings};
use abacus_flash::trainer::Trainer;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything the trainer asked the collaborators to do, in order.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Show(u32),
    Hide,
    Prompt(Prompt),
    Destroy,
    Notify(NoticeKind, String),
    Cue(Cue),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl DisplayAdapter for Recorder {
    fn show(&mut self, value: u32) {
        self.calls.push(Call::Show(value));
    }
    fn hide(&mut self) {
        self.calls.push(Call::Hide);
    }
    fn prompt(&mut self, prompt: &Prompt, _text: &str) {
        self.calls.push(Call::Prompt(prompt.clone()));
    }
    fn destroy(&mut self) {
        self.calls.push(Call::Destroy);
    }
}

impl CueSink for Recorder {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.calls.push(Call::Notify(kind, message.to_string()));
    }
    fn play_cue(&mut self, cue: Cue) {
        self.calls.push(Call::Cue(cue));
    }
}

/// Returns keys untranslated so assertions stay language-neutral.
struct Keys;

impl Localizer for Keys {
    fn translate(&self, key: &str, _params: &[(&str, &str)]) -> String {
        key.to_string()
    }
}

type TestTrainer = Trainer<Recorder, Recorder, Keys>;

fn trainer(settings: Settings, seed: u64) -> TestTrainer {
    Trainer::new(
        settings,
        StdRng::seed_from_u64(seed),
        Recorder::default(),
        Recorder::default(),
        Keys,
    )
}

fn two_digit_single() -> Settings {
    Settings {
        digit_count: 2,
        total_examples: 1,
        series_count: 1,
        ..Settings::default()
    }
}

fn wait_for_input(t: &mut TestTrainer) {
    // prepare + display time
    let wait = Duration::from_secs(2) + t.settings().display_time();
    t.advance(wait).unwrap();
    assert_eq!(t.phase(), Phase::Input);
}

#[test]
fn correct_single_answer_completes_session() {
    for seed in 0..20 {
        let mut t = trainer(two_digit_single(), seed);
        t.start();
        wait_for_input(&mut t);

        let n = t.session().current_number.unwrap();
        assert!((10..=99).contains(&n));
        assert!(t.display().calls.contains(&Call::Show(n)));

        t.submit(vec![n.to_string()]).unwrap();
        assert_eq!(t.phase(), Phase::Feedback(Feedback::Success));
        t.advance(Duration::from_secs(2)).unwrap();

        assert_eq!(t.phase(), Phase::Complete);
        let SessionResults {
            correct,
            incorrect,
            total,
            accuracy_percent,
            ..
        } = t.results().unwrap();
        assert_eq!((correct, incorrect, total, accuracy_percent), (1, 0, 1, 100));
    }
}

#[test]
fn wrong_single_answer_waits_for_skip() {
    let mut t = trainer(two_digit_single(), 1);
    t.start();
    wait_for_input(&mut t);

    let n = t.session().current_number.unwrap();
    let wrong = if n == 12 { 13 } else { 12 };
    t.submit(vec![wrong.to_string()]).unwrap();
    assert_eq!(
        t.phase(),
        Phase::Feedback(Feedback::Failure { replay: None })
    );
    assert!(t
        .display()
        .calls
        .contains(&Call::Prompt(Prompt::Incorrect { expected: vec![n] })));

    // no auto-advance, however long we wait
    t.advance(Duration::from_secs(600)).unwrap();
    assert_eq!(
        t.phase(),
        Phase::Feedback(Feedback::Failure { replay: None })
    );
    assert_eq!(t.results(), None);

    t.continue_round().unwrap();
    let results = t.results().unwrap();
    assert_eq!(results.accuracy_percent, 0);
    assert_eq!(results.incorrect, 1);
    assert_eq!(t.phase(), Phase::Complete);
}

#[test]
fn exit_during_display_cancels_the_timer() {
    let mut t = trainer(two_digit_single(), 2);
    t.start();
    t.advance(Duration::from_secs(2)).unwrap();
    assert!(matches!(t.phase(), Phase::Display(_)));

    t.exit().unwrap();
    assert_eq!(t.display().calls.last(), Some(&Call::Destroy));
    let calls_at_exit = t.display().calls.len();

    let display_time = t.settings().display_time();
    t.advance(display_time).unwrap();
    t.advance(Duration::from_secs(30)).unwrap();
    assert_eq!(t.phase(), Phase::Exited);
    assert_eq!(t.display().calls.len(), calls_at_exit);
    assert!(!t
        .display()
        .calls
        .iter()
        .any(|c| matches!(c, Call::Prompt(Prompt::Answer { .. }))));
}

#[test]
fn cue_order_over_a_two_round_session() {
    let mut t = trainer(
        Settings {
            digit_count: 1,
            total_examples: 2,
            ..Settings::default()
        },
        3,
    );
    t.start();
    wait_for_input(&mut t);
    let n = t.session().current_number.unwrap();
    t.submit(vec![n.to_string()]).unwrap();
    t.advance(Duration::from_secs(2)).unwrap();

    wait_for_input(&mut t);
    let n = t.session().current_number.unwrap();
    t.submit(vec![(n + 1).to_string()]).unwrap();
    t.continue_round().unwrap();

    let cues: Vec<Cue> = t
        .cues()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Cue(cue) => Some(*cue),
            _ => None,
        })
        .collect();
    assert_eq!(
        cues,
        vec![Cue::Tick, Cue::Correct, Cue::Next, Cue::Tick, Cue::Wrong]
    );
    assert_eq!(t.results().map(|r| r.accuracy_percent), Some(50));
}

#[test]
fn series_round_reveals_then_scores_each_item() {
    let mut t = trainer(
        Settings {
            digit_count: 3,
            series_count: 3,
            total_examples: 1,
            display_time_secs: 0.5,
            ..Settings::default()
        },
        4,
    );
    t.start();
    t.advance(Duration::from_secs(2)).unwrap();
    let series = t.session().current_series.clone();
    assert_eq!(series.len(), 3);

    // three displays and two gaps
    t.advance(Duration::from_millis(3 * 500 + 2 * 500)).unwrap();
    assert_eq!(t.phase(), Phase::Input);

    let shown: Vec<u32> = t
        .display()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Show(v) => Some(*v),
            _ => None,
        })
        .collect();
    assert_eq!(shown, series);

    let mut answers: Vec<String> = series.iter().map(|v| v.to_string()).collect();
    answers[1] = "1".into();
    t.submit(answers).unwrap();
    assert_eq!(t.session().correct_count, 2);
    assert_eq!(t.session().incorrect_count, 1);
    assert_eq!(t.session().current_example_index, 1);

    t.continue_round().unwrap();
    let results = t.results().unwrap();
    assert_eq!(results.total, 3);
    assert_eq!(results.accuracy_percent, 67);
}

#[test]
fn show_again_replays_series_with_gaps() {
    let mut t = trainer(
        Settings {
            digit_count: 2,
            series_count: 2,
            total_examples: 2,
            ..Settings::default()
        },
        5,
    );
    t.start();
    t.advance(Duration::from_secs(2) + Duration::from_millis(2500))
        .unwrap();
    assert_eq!(t.phase(), Phase::Input);
    let series = t.session().current_series.clone();
    t.submit(vec!["1".into(), "2".into()]).unwrap();
    let scores = (t.session().correct_count, t.session().incorrect_count);

    let before = t.display().calls.len();
    t.show_again().unwrap();
    t.advance(Duration::from_millis(2500)).unwrap();
    let replay = t.display().calls[before..].to_vec();
    assert_eq!(
        replay,
        vec![
            Call::Show(series[0]),
            Call::Hide,
            Call::Show(series[1]),
            Call::Hide
        ]
    );
    assert_eq!(
        (t.session().correct_count, t.session().incorrect_count),
        scores
    );
    assert_eq!(
        t.phase(),
        Phase::Feedback(Feedback::Failure { replay: None })
    );
}

#[test]
fn invalid_answers_keep_the_round_open() {
    let mut t = trainer(two_digit_single(), 6);
    t.start();
    wait_for_input(&mut t);

    t.submit(vec!["".into()]).unwrap();
    t.submit(vec!["12a".into()]).unwrap();
    t.submit(vec!["-".into()]).unwrap();
    assert_eq!(
        t.cues().calls,
        vec![
            Call::Cue(Cue::Tick),
            Call::Notify(NoticeKind::Error, "errors.emptyAnswer".into()),
            Call::Notify(NoticeKind::Error, "errors.invalidAnswer".into()),
            Call::Notify(NoticeKind::Error, "errors.invalidAnswer".into()),
        ]
    );
    assert_eq!(t.phase(), Phase::Input);
    assert_eq!(t.session().current_example_index, 0);
}

#[test]
fn special_ranges_feed_the_rounds() {
    let mut t = trainer(
        Settings {
            digit_count: 5,
            total_examples: 30,
            number_ranges: NumberRanges {
                round_10_90: true,
                ..NumberRanges::default()
            },
            ..Settings::default()
        },
        7,
    );
    t.start();
    for _ in 0..30 {
        wait_for_input(&mut t);
        let n = t.session().current_number.unwrap();
        assert!(n % 10 == 0 && (10..=90).contains(&n), "{n}");
        t.submit(vec![n.to_string()]).unwrap();
        t.continue_round().unwrap();
    }
    assert_eq!(t.results().map(|r| r.correct), Some(30));
}
