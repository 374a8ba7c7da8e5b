pub mod abacus;
pub mod display;
pub mod screen;
pub mod settings_form;
pub mod status;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::collaborators::NoticeKind;
use crate::round::{Feedback, Phase, Prompt};
use crate::session::SessionResults;
use crate::ui::abacus::Soroban;
use crate::ui::screen::current_screen;
use crate::ui::settings_form::SettingsField;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Training => render_training(self, area, buf),
            AppState::Results => match self.trainer.results() {
                Some(results) => render_results(self, &results, area, buf),
                None => render_training(self, area, buf),
            },
            AppState::Settings => render_settings(self, area, buf),
        }
    }
}

fn render_training(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let display = app.trainer.display();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(Soroban::height()),
            Constraint::Length(2), // prompt
            Constraint::Length(1), // answer form
            Constraint::Length(1), // padding
            Constraint::Length(1), // toast
            Constraint::Length(1), // key hints
        ])
        .split(area);

    status_bar(app).render(chunks[0], buf);

    Soroban {
        value: display.visible,
        rods: display.rods,
    }
    .render(chunks[1], buf);

    let prompt_style = match display.prompt {
        Some(Prompt::Correct) => bold_style.fg(Color::Green),
        Some(Prompt::Incorrect { .. }) => bold_style.fg(Color::Red),
        Some(Prompt::Watch) => bold_style.fg(Color::Yellow),
        _ => bold_style,
    };
    Paragraph::new(Span::styled(display.prompt_text.as_str(), prompt_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    if display.form.is_open() {
        let accepting = app.trainer.phase() == Phase::Input;
        let spans: Vec<Span> = display
            .form
            .fields()
            .iter()
            .enumerate()
            .flat_map(|(i, value)| {
                let focused = accepting && i == display.form.focus();
                let style = if focused {
                    bold_style.add_modifier(Modifier::UNDERLINED)
                } else {
                    dim_style
                };
                let cursor = if focused { "_" } else { "" };
                [
                    Span::styled(format!("[ {value}{cursor} ]"), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }

    if let Some(toast) = app.trainer.cues().toast() {
        let color = match toast.kind {
            NoticeKind::Info => Color::Cyan,
            NoticeKind::Success => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        };
        Paragraph::new(Span::styled(toast.message.as_str(), bold_style.fg(color)))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }

    let hint_key = match app.trainer.phase() {
        Phase::Input => Some("game.answerHint"),
        Phase::Feedback(Feedback::Failure { .. }) => Some("game.failureHint"),
        Phase::Feedback(Feedback::Success) => Some("game.successHint"),
        _ => None,
    };
    if let Some(key) = hint_key {
        Paragraph::new(Span::styled(app.translate(key, &[]), dim_style))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}

fn status_bar(app: &App) -> Paragraph<'static> {
    let session = app.trainer.session();
    let total = session.total_examples();
    let current = (session.current_example_index + 1).min(total.max(1)).to_string();
    let total = total.to_string();
    let progress = app.translate(
        "game.progress",
        &[("current", current.as_str()), ("total", total.as_str())],
    );

    Paragraph::new(Line::from(vec![
        Span::styled(progress, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(
            format!(
                "{}: {}",
                app.translate("game.correctCount", &[]),
                session.correct_count
            ),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!(
                "{}: {}",
                app.translate("game.incorrectCount", &[]),
                session.incorrect_count
            ),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Center)
}

fn render_results(app: &App, results: &SessionResults, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let label = |key: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", app.translate(key, &[])), bold_style),
            Span::raw(value),
        ])
    };

    let seconds = results.duration_secs.to_string();
    let lines = vec![
        Line::from(Span::styled(
            app.translate("results.title", &[]),
            bold_style.fg(Color::Magenta),
        )),
        Line::default(),
        label("results.accuracy", format!("{}%", results.accuracy_percent)),
        label("results.correctAnswers", results.correct.to_string()),
        label("results.incorrectAnswers", results.incorrect.to_string()),
        label(
            "results.duration",
            app.translate("results.durationFormat", &[("seconds", seconds.as_str())]),
        ),
        Line::default(),
        Line::from(Span::styled(
            app.translate(results.verdict().message_key(), &[]),
            bold_style.fg(Color::Yellow),
        )),
        Line::default(),
        Line::from(Span::styled(
            app.translate("results.hint", &[]),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
    ];

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}

fn render_settings(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let form = &app.settings_form;
    let draft = form.draft();
    let check = |on: bool| String::from(if on { "[x]" } else { "[ ]" });

    let mut lines = vec![
        Line::from(Span::styled(
            app.translate("settings.title", &[]),
            bold_style.fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            app.translate("settings.description", &[]),
            dim_style,
        )),
        Line::default(),
    ];
    for field in SettingsField::ALL {
        let value = match field {
            SettingsField::Digits => draft.digit_count.to_string(),
            SettingsField::DisplayTime => format!(
                "{:.1} {}",
                draft.display_time_secs,
                app.translate("settings.timeUnit", &[])
            ),
            SettingsField::Examples => draft.total_examples.to_string(),
            SettingsField::Series => draft.series_count.to_string(),
            SettingsField::Range10To19 => check(draft.number_ranges.range_10_19),
            SettingsField::Round10To90 => check(draft.number_ranges.round_10_90),
            SettingsField::Round100To900 => check(draft.number_ranges.round_100_900),
            SettingsField::Language => draft.language.native_name().to_string(),
            SettingsField::Sound => check(draft.sound),
        };
        let (marker, style) = if field == form.focus() {
            ("> ", bold_style.fg(Color::Yellow))
        } else {
            ("  ", Style::default())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}: ", app.translate(field.label_key(), &[])), style),
            Span::styled(value, style),
        ]));
    }
    lines.push(Line::default());
    if let Some(toast) = app.trainer.cues().toast() {
        lines.push(Line::from(Span::styled(
            toast.message.as_str(),
            bold_style.fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        app.translate("settings.hint", &[]),
        dim_style.add_modifier(Modifier::ITALIC),
    )));

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}
