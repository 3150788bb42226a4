// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod capture;
pub mod catalog;
pub mod clock;
pub mod color;
pub mod config;
pub mod figure;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod sequencer;
pub mod session;
pub mod ui;
