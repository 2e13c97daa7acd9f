//src/edit_mode.rs
use chrono::NaiveDateTime;
use tracing::info;

use crate::selection::SelectionController;
use crate::store::WorkoutStore;

/// Which day toggles apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Target is always "now".
    #[default]
    Live,
    /// Target is an explicit day picked by the user.
    Staged(NaiveDateTime),
}

#[derive(Debug, Clone, Default)]
pub struct EditModeController {
    mode: EditMode,
}

impl EditModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    pub const fn is_staged(&self) -> bool {
        matches!(self.mode, EditMode::Staged(_))
    }

    pub fn target_day(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.mode {
            EditMode::Live => now,
            EditMode::Staged(day) => day,
        }
    }

    /// Targets `day`, past, present or future. Calling it while already staged
    /// moves the target without committing.
    pub fn begin_edit(&mut self, day: NaiveDateTime) {
        info!(day = %day.date(), "editing day");
        self.mode = EditMode::Staged(day);
    }

    /// Makes the selection the complete set of workouts for the staged day,
    /// every record rebuilt with empty details, then returns to live mode.
    /// Does nothing while live. Returns whether a commit happened.
    pub fn commit(&mut self, store: &mut WorkoutStore, selection: &SelectionController) -> bool {
        let EditMode::Staged(day) = self.mode else {
            return false;
        };
        let ids = store.replace_day(day, selection.entries());
        info!(day = %day.date(), workouts = ids.len(), "committed staged day");
        self.mode = EditMode::Live;
        true
    }

    /// Leaves staging without committing.
    pub fn reset_to_today(&mut self) {
        if self.is_staged() {
            info!("abandoned staged edit");
        }
        self.mode = EditMode::Live;
    }
}
