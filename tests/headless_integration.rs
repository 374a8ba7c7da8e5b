use std::sync::mpsc;
use std::time::Duration;

use abacus_flash::app::{App, AppState, Flow};
use abacus_flash::round::Phase;
use abacus_flash::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use abacus_flash::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Each Tick stands for this much simulated time, keeping the tests fast.
const SIMULATED_TICK: Duration = Duration::from_millis(250);

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_number(tx: &mpsc::Sender<AppEvent>, value: &str) {
    for c in value.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
}

/// Drive the app like the binary's loop does, answering every round
/// through `answer`. Returns how the loop ended.
fn drive(app: &mut App, answer: impl Fn(u32) -> String, max_steps: u32) -> Option<Flow> {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let mut answered_round = None;

    for _ in 0..max_steps {
        match runner.step() {
            AppEvent::Tick => app.on_elapsed(SIMULATED_TICK).unwrap(),
            AppEvent::Resize => {}
            AppEvent::Key(k) => {
                if app.on_key(k).unwrap() == Flow::Quit {
                    return Some(Flow::Quit);
                }
            }
        }

        let index = app.trainer.session().current_example_index;
        if app.trainer.phase() == Phase::Input && answered_round != Some(index) {
            answered_round = Some(index);
            let value = app.trainer.session().current_number.unwrap();
            type_number(&tx, &answer(value));
        }
        if app.state == AppState::Results {
            return Some(Flow::Running);
        }
    }
    None
}

#[test]
fn headless_session_completes_with_all_correct() {
    let mut app = App::new(
        Settings {
            digit_count: 3,
            total_examples: 3,
            ..Settings::default()
        },
        StdRng::seed_from_u64(21),
    );
    app.start();

    let ended = drive(&mut app, |n| n.to_string(), 500);
    assert_eq!(ended, Some(Flow::Running));
    assert_eq!(app.state, AppState::Results);

    let results = app.trainer.results().unwrap();
    assert_eq!(results.correct, 3);
    assert_eq!(results.accuracy_percent, 100);
}

#[test]
fn headless_wrong_answers_are_skipped() {
    let mut app = App::new(
        Settings {
            digit_count: 2,
            total_examples: 2,
            ..Settings::default()
        },
        StdRng::seed_from_u64(22),
    );
    app.start();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    for _ in 0..200u32 {
        match runner.step() {
            AppEvent::Tick => app.on_elapsed(SIMULATED_TICK).unwrap(),
            AppEvent::Key(k) => {
                app.on_key(k).unwrap();
            }
            AppEvent::Resize => {}
        }
        match app.trainer.phase() {
            Phase::Input if !app.trainer.display().form.fields()[0].is_empty() => {}
            // a two digit number is never 5
            Phase::Input => type_number(&tx, "5"),
            Phase::Feedback(_) => tx.send(key(KeyCode::Char('n'))).unwrap(),
            _ => {}
        }
        if app.state == AppState::Results {
            break;
        }
    }

    let results = app.trainer.results().expect("session should complete");
    assert_eq!(results.incorrect, 2);
    assert_eq!(results.accuracy_percent, 0);
}

#[test]
fn headless_escape_quits_mid_round() {
    let mut app = App::new(Settings::default(), StdRng::seed_from_u64(23));
    app.start();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    tx.send(AppEvent::Resize).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();

    let mut quit = false;
    for _ in 0..10u32 {
        if let AppEvent::Key(k) = runner.step() {
            quit = app.on_key(k).unwrap() == Flow::Quit;
            break;
        }
    }
    assert!(quit);
    assert_eq!(app.trainer.phase(), Phase::Exited);

    // time keeps passing in the loop until it notices; nothing may fire
    app.on_elapsed(Duration::from_secs(10)).unwrap();
    assert_eq!(app.trainer.phase(), Phase::Exited);
}
