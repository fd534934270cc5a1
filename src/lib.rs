// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod sentence_bank;
pub mod session;
pub mod typing_session;
pub mod ui;
