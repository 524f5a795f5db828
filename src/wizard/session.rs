use crate::drafting::Draft;
use crate::models::{EventRecord, InteractiveMoment, MusicMoment};
use crate::proposal::join_setlist;

use super::fields::{toggle_choice, FieldUpdate};
use super::steps::{Step, StepSequencer};

/// Whether the user is filling in the wizard or looking at the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Presenting,
}

/// Everything that can happen to a session. Key presses and finished
/// drafting requests are both turned into one of these and applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Update(FieldUpdate),
    ToggleMusicMoment(MusicMoment),
    ToggleInteractiveMoment(InteractiveMoment),
    Advance,
    Retreat,
    /// Open the proposal. Only honoured on the last step.
    Finalize,
    /// Leave the proposal and return to the step that was active.
    Edit,
    /// Store a drafted summary and setlist together.
    ApplyDraft(Draft),
}

/// One intake session: the record, the wizard cursor and the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    record: EventRecord,
    steps: StepSequencer,
    mode: Mode,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            record: EventRecord::default(),
            steps: StepSequencer::new(),
            mode: Mode::Editing,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    pub fn step(&self) -> Step {
        self.steps.current()
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.steps
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn can_finalize(&self) -> bool {
        self.mode == Mode::Editing && self.steps.is_final()
    }

    /// Apply one action. Returns `true` when anything changed, `false` for
    /// no-ops such as advancing past the last step.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Update(update) => self.replace_record(self.record.with_update(update)),
            Action::ToggleMusicMoment(moment) => {
                let next = toggle_choice(&self.record.music_moments, moment);
                self.replace_record(self.record.with_update(FieldUpdate::MusicMoments(next)))
            }
            Action::ToggleInteractiveMoment(moment) => {
                let next = toggle_choice(&self.record.interactive_moments, moment);
                self.replace_record(
                    self.record
                        .with_update(FieldUpdate::InteractiveMoments(next)),
                )
            }
            Action::Advance => self.mode == Mode::Editing && self.steps.advance(),
            Action::Retreat => self.mode == Mode::Editing && self.steps.retreat(),
            Action::Finalize => {
                if !self.can_finalize() {
                    return false;
                }
                self.mode = Mode::Presenting;
                log::info!("proposal opened");
                true
            }
            Action::Edit => {
                if self.mode != Mode::Presenting {
                    return false;
                }
                self.mode = Mode::Editing;
                log::info!("back to editing at step {}", self.steps.current().number());
                true
            }
            Action::ApplyDraft(draft) => {
                // Both fields land in a single record replacement.
                let next = self
                    .record
                    .with_update(FieldUpdate::ConceptSummary(draft.summary))
                    .with_update(FieldUpdate::SuggestedSetlist(join_setlist(&draft.setlist)));
                self.replace_record(next)
            }
        }
    }

    fn replace_record(&mut self, next: EventRecord) -> bool {
        if next == self.record {
            return false;
        }
        self.record = next;
        true
    }
}
