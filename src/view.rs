//src/view.rs
//! Read-only projections handed to whatever renders the tracker.
use chrono::NaiveDateTime;

use crate::calendar::{date_label, day_label, end_of_day, history_label, same_day};
use crate::store::{Activity, LiftType, Workout, WorkoutStore};

/// Icons shown inside one day cell before the `+N` marker takes over.
pub const MAX_ICONS_PER_DAY: usize = 4;
/// Shown for a day with no workouts.
pub const EMPTY_DAY_ICON: &str = "❌";

pub const fn activity_icon(activity: Activity) -> &'static str {
    match activity {
        Activity::Stretch => "🧘",
        Activity::Cycle => "🚴",
        Activity::Swim => "🏊",
        Activity::Lift => "🏋️",
        Activity::Walk => "🚶",
        Activity::Ball => "🏀",
    }
}

pub const fn lift_type_icon(lift_type: LiftType) -> &'static str {
    match lift_type {
        LiftType::Push => "💪",
        LiftType::Pull => "🎒",
        LiftType::Legs => "🦵",
        LiftType::FullBody => "🏋️",
    }
}

/// A lift shows its subtype when one is set.
pub fn workout_icon(workout: &Workout) -> &'static str {
    match (workout.activity, workout.lift_type) {
        (Activity::Lift, Some(lift_type)) => lift_type_icon(lift_type),
        (activity, _) => activity_icon(activity),
    }
}

/// `Lift (Push)`, `Swim`, ...
pub fn workout_title(workout: &Workout) -> String {
    match workout.lift_type {
        Some(lift_type) => format!("{} ({lift_type})", workout.activity),
        None => workout.activity.to_string(),
    }
}

/// One slot of the visible window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: NaiveDateTime,
    pub day_label: String,
    pub date_label: String,
    pub icons: Vec<&'static str>,
    pub overflow_count: usize,
    /// The day is the current edit target.
    pub is_active: bool,
}

impl DayCell {
    pub fn build(store: &WorkoutStore, day: NaiveDateTime, target: NaiveDateTime) -> Self {
        let workouts = store.workouts_on(day);
        Self {
            day,
            day_label: day_label(day),
            date_label: date_label(day),
            icons: workouts
                .iter()
                .take(MAX_ICONS_PER_DAY)
                .map(|w| workout_icon(w))
                .collect(),
            overflow_count: workouts.len().saturating_sub(MAX_ICONS_PER_DAY),
            is_active: same_day(day, target),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Workouts of one day in the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryGroup {
    pub day: NaiveDateTime,
    pub label: String,
    pub workouts: Vec<Workout>,
}

/// Groups workouts up to the end of `today` by day, newest day first. Within a
/// day the newest instant comes first, insertion order breaking ties.
pub fn history(store: &WorkoutStore, today: NaiveDateTime) -> Vec<HistoryGroup> {
    let cutoff = end_of_day(today);
    let mut recent: Vec<&Workout> = store.all().iter().filter(|w| w.date <= cutoff).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let mut groups: Vec<HistoryGroup> = Vec::new();
    for workout in recent {
        match groups.last_mut() {
            Some(group) if same_day(group.day, workout.date) => {
                group.workouts.push(workout.clone());
            }
            _ => groups.push(HistoryGroup {
                day: workout.date,
                label: history_label(workout.date),
                workouts: vec![workout.clone()],
            }),
        }
    }
    groups
}
