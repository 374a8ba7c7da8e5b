// Library surface for the binary and for headless/integration tests.
// The training core (number_pool .. trainer) has no terminal dependency;
// app, runtime and ui are the terminal front end.
pub mod app;
pub mod app_dirs;
pub mod collaborators;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod number_pool;
pub mod round;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod timer;
pub mod trainer;
pub mod ui;
pub mod validation;
