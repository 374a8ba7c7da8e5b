use abacus_flash::{
    app::{App, Flow},
    app_dirs::AppDirs,
    collaborators::NoticeKind,
    i18n::Language,
    logging,
    runtime::{AppEvent, Clock, CrosstermEventSource, FixedTicker, Runner},
    settings::{
        FileSettingsStore, NumberRanges, Settings, SettingsStore, MAX_DISPLAY_SECS,
        MIN_DISPLAY_SECS,
    },
    ui,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    time::Duration,
};

const TICK_RATE_MS: u64 = 50;

/// flash-number recognition trainer for the mental abacus
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Flashes numbers on a soroban for a moment and asks you to recall them. \
                  Options given here are remembered for the next run."
)]
pub struct Cli {
    /// digits per number
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    digits: Option<u8>,

    /// seconds each number stays visible (0.1 to 5.0)
    #[clap(short = 't', long, value_parser = parse_display_time)]
    display_time: Option<f64>,

    /// number of examples per session
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    examples: Option<u32>,

    /// numbers shown per example; more than one makes each example a series
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=10))]
    series: Option<u32>,

    /// draw from 10-19
    #[clap(long = "range-10-19")]
    range_10_19: bool,

    /// draw from the round tens 10, 20 .. 90
    #[clap(long = "round-10-90")]
    round_10_90: bool,

    /// draw from the round hundreds 100, 200 .. 900
    #[clap(long = "round-100-900")]
    round_100_900: bool,

    /// forget saved special ranges and use the digit count again
    #[clap(long, conflicts_with_all = ["range_10_19", "round_10_90", "round_100_900"])]
    no_ranges: bool,

    /// interface language
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// no bell on wrong answers
    #[clap(long, conflicts_with = "sound")]
    mute: bool,

    /// ring the bell on wrong answers
    #[clap(long)]
    sound: bool,

    /// seed for a reproducible sequence of numbers
    #[clap(long)]
    seed: Option<u64>,
}

fn parse_display_time(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (MIN_DISPLAY_SECS..=MAX_DISPLAY_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!(
            "must be between {MIN_DISPLAY_SECS} and {MAX_DISPLAY_SECS} seconds"
        ))
    }
}

impl Cli {
    /// Overlay the flags that were given on top of `settings`.
    fn apply_to(&self, settings: Settings) -> Settings {
        let flagged = NumberRanges {
            range_10_19: self.range_10_19,
            round_10_90: self.round_10_90,
            round_100_900: self.round_100_900,
        };
        let number_ranges = if self.no_ranges {
            NumberRanges::default()
        } else if flagged.any() {
            flagged
        } else {
            settings.number_ranges
        };
        let sound = if self.mute {
            false
        } else if self.sound {
            true
        } else {
            settings.sound
        };

        Settings {
            digit_count: self.digits.unwrap_or(settings.digit_count),
            display_time_secs: self.display_time.unwrap_or(settings.display_time_secs),
            total_examples: self.examples.unwrap_or(settings.total_examples),
            series_count: self.series.unwrap_or(settings.series_count),
            number_ranges,
            language: self.language.unwrap_or(settings.language),
            sound,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if !logging::init_file_logging(&path) {
            eprintln!("logging disabled: cannot write {}", path.display());
        }
    }

    let store = FileSettingsStore::new();
    let stored = store.load();
    let settings = cli.apply_to(stored.clone().unwrap_or_default());
    if let Err(e) = settings.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }
    let mut save_failed = false;
    if stored.as_ref() != Some(&settings) {
        if let Err(e) = store.save(&settings) {
            tracing::warn!("settings not saved to {}: {e}", store.path().display());
            save_failed = true;
        }
    }
    tracing::info!("starting with {settings:?}");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, rng).with_store(Box::new(store));
    if save_failed {
        app.notice(NoticeKind::Warning, "settings.saveFailed");
    }
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut clock = Clock::new();
    app.start();

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();
        app.on_elapsed(clock.lap())?;
        if app.trainer.cues_mut().take_bell() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        if let AppEvent::Key(key) = event {
            if app.on_key(key)? == Flow::Quit {
                break;
            }
        }
    }

    Ok(())
}
