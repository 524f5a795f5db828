//! Ratatui front-end: the four-step intake wizard and the proposal view.
//!
//! `App` owns the session and all screen state; `terminal` runs the draw and
//! input loop around it.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
