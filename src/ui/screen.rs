use ratatui::Frame;

use crate::app::{App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Training screen: status bar, abacus, prompt and answer form
pub struct TrainingScreen;

impl Screen for TrainingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Results screen - renders the results UI using the same App widget
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Settings screen: one line per setting, edited in place
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Training => Box::new(TrainingScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::Settings => Box::new(SettingsScreen),
    }
}
