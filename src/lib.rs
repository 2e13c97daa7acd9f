// src/lib.rs
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

// --- Declare modules ---
pub mod calendar;
mod config;
pub mod edit_mode;
pub mod progress;
pub mod selection;
pub mod store;
pub mod view;
pub mod window;

// --- Expose public types ---
pub use calendar::{add_days, same_day, start_of_week, Clock};
pub use config::{parse_color, Config, Error as ConfigError, StandardColor, Theme};
pub use edit_mode::EditMode;
pub use progress::{WeeklyGoal, WeeklyProgress};
pub use store::{parse_lift_type, Activity, LiftType, Workout, WorkoutField, WorkoutId};
pub use view::{DayCell, HistoryGroup};
pub use window::{Direction, WINDOW_DAYS};

use edit_mode::EditModeController;
use selection::SelectionController;
use store::WorkoutStore;
use window::DateWindow;

/// Owns all tracker state and is the only way to mutate it.
///
/// Mutations re-derive the selection for the current edit target before
/// acting on it and again afterwards. In live mode the target follows the
/// clock, so a selection read after midnight reflects the previous day until
/// the next mutation.
pub struct Tracker {
    pub config: Config,
    pub config_path: PathBuf,
    store: WorkoutStore,
    selection: SelectionController,
    edit_mode: EditModeController,
    goal: WeeklyGoal,
    window: DateWindow,
    clock: Clock,
}

impl Tracker {
    /// Loads the configuration from disk and starts an empty session on the
    /// local wall clock.
    /// # Errors
    /// Returns `anyhow::Error` if the config path cannot be determined or loaded.
    pub fn initialize() -> Result<Self> {
        let config_path = config::get_config_path()
            .context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;
        Ok(Self::with_clock(
            config,
            config_path,
            Box::new(calendar::system_now),
        ))
    }

    /// Builds a session with an injected clock.
    pub fn with_clock(config: Config, config_path: PathBuf, clock: Clock) -> Self {
        let now = clock();
        let mut tracker = Self {
            goal: config.weekly_goal,
            config,
            config_path,
            store: WorkoutStore::new(),
            selection: SelectionController::new(),
            edit_mode: EditModeController::new(),
            window: DateWindow::centered_on(now),
            clock,
        };
        tracker.refresh_selection();
        tracker
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// Day toggles currently apply to.
    pub fn target_day(&self) -> NaiveDateTime {
        self.edit_mode.target_day(self.now())
    }

    fn refresh_selection(&mut self) {
        let day = self.target_day();
        self.selection.recompute(&self.store, day);
    }

    // --- Reads ---

    pub fn selected_activities(&self) -> &BTreeSet<Activity> {
        self.selection.selected()
    }

    pub fn is_selected(&self, activity: Activity) -> bool {
        self.selection.is_selected(activity)
    }

    pub fn selected_lift_type(&self) -> Option<LiftType> {
        self.selection.lift_type()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode.mode()
    }

    pub fn goal(&self) -> WeeklyGoal {
        self.goal
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.window.anchor()
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn workouts_on(&self, day: NaiveDateTime) -> Vec<&Workout> {
        self.store.workouts_on(day)
    }

    pub fn workout(&self, id: WorkoutId) -> Option<&Workout> {
        self.store.get(id)
    }

    pub fn visible_days(&self) -> Vec<DayCell> {
        let target = self.target_day();
        self.window
            .visible_days()
            .into_iter()
            .map(|day| DayCell::build(&self.store, day, target))
            .collect()
    }

    /// Progress for the week containing today.
    pub fn weekly_progress(&self) -> WeeklyProgress {
        let count = progress::weekly_progress(&self.store, self.now());
        WeeklyProgress::new(count, self.goal)
    }

    /// Workouts up to the end of today grouped by day, newest first.
    pub fn history(&self) -> Vec<HistoryGroup> {
        view::history(&self.store, self.now())
    }

    // --- Mutations ---

    pub fn toggle(&mut self, activity: Activity) {
        self.refresh_selection();
        let day = self.target_day();
        self.selection.toggle(&mut self.store, day, activity);
        self.refresh_selection();
    }

    pub fn set_lift_type(&mut self, lift_type: Option<LiftType>) {
        self.refresh_selection();
        let day = self.target_day();
        self.selection
            .set_lift_type(&mut self.store, day, lift_type);
        self.refresh_selection();
    }

    pub fn begin_edit(&mut self, day: NaiveDateTime) {
        self.edit_mode.begin_edit(day);
        self.refresh_selection();
    }

    /// Materialises the staged selection. Returns `false` in live mode.
    pub fn commit(&mut self) -> bool {
        self.refresh_selection();
        let committed = self.edit_mode.commit(&mut self.store, &self.selection);
        self.refresh_selection();
        committed
    }

    pub fn reset_to_today(&mut self) {
        self.edit_mode.reset_to_today();
        self.refresh_selection();
    }

    /// Re-centres the window on today and drops any staged edit.
    pub fn jump_to_today(&mut self) {
        let now = self.now();
        self.window.jump_to_today(now);
        self.reset_to_today();
    }

    pub fn step(&mut self, direction: Direction) {
        self.window.step(direction);
    }

    /// Edits duration or notes. Returns `false` if the workout no longer exists.
    pub fn set_field(&mut self, id: WorkoutId, field: WorkoutField, value: &str) -> bool {
        let applied = self.store.set_field(id, field, value);
        self.refresh_selection();
        applied
    }

    /// Applies free-form goal input, clamping into range.
    pub fn set_goal(&mut self, input: &str) -> WeeklyGoal {
        self.set_goal_value(WeeklyGoal::parse_lenient(input))
    }

    pub fn set_goal_value(&mut self, goal: WeeklyGoal) -> WeeklyGoal {
        if goal != self.goal {
            info!(from = %self.goal, to = %goal, "weekly goal changed");
        }
        self.goal = goal;
        goal
    }
}
