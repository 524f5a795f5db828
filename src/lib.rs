//! Core library for the event proposal wizard.
//!
//! The record model, wizard state machine and proposal builder are plain data
//! and pure functions; `ui` and `drafting` are the only modules that touch the
//! terminal or the network.
pub mod config;
pub mod drafting;
pub mod logging;
pub mod models;
pub mod proposal;
pub mod ui;
pub mod wizard;

pub use config::Settings;
pub use models::EventRecord;
pub use proposal::{build_proposal, parse_setlist, ProposalDocument};
pub use wizard::{Action, Mode, Session};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
