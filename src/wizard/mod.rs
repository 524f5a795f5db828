//! Wizard state machine split across logical submodules.

mod fields;
mod session;
mod steps;

pub use fields::{flag_update, text_update, toggle_choice, FieldId, FieldUpdate};
pub use session::{Action, Mode, Session};
pub use steps::{FieldKind, Step, StepSequencer};
