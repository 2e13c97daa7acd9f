//src/selection.rs
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

use crate::store::{Activity, LiftType, WorkoutStore};

/// Checked activities and lift subtype for the day being edited.
///
/// This is a projection of the store: after any change to the store or to the
/// target day the owner calls [`SelectionController::recompute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: BTreeSet<Activity>,
    lift_type: Option<LiftType>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recompute(&mut self, store: &WorkoutStore, day: NaiveDateTime) {
        self.selected = store.workouts_on(day).iter().map(|w| w.activity).collect();
        self.lift_type = store.lift_on(day).and_then(|w| w.lift_type);
    }

    pub fn selected(&self) -> &BTreeSet<Activity> {
        &self.selected
    }

    pub fn is_selected(&self, activity: Activity) -> bool {
        self.selected.contains(&activity)
    }

    pub const fn lift_type(&self) -> Option<LiftType> {
        self.lift_type
    }

    /// Flips one activity for `day`, writing the change through to the store.
    /// Activities are independent of each other; Lift does not displace the
    /// others and they do not displace Lift.
    pub fn toggle(&mut self, store: &mut WorkoutStore, day: NaiveDateTime, activity: Activity) {
        if self.selected.remove(&activity) {
            if activity.is_lift() {
                self.lift_type = None;
            }
            store.remove(activity, day);
        } else {
            self.selected.insert(activity);
            let lift_type = if activity.is_lift() {
                self.lift_type
            } else {
                None
            };
            store.upsert(activity, day, lift_type);
        }
    }

    /// Records the subtype and retypes an existing Lift in place, so its
    /// duration and notes survive.
    pub fn set_lift_type(
        &mut self,
        store: &mut WorkoutStore,
        day: NaiveDateTime,
        lift_type: Option<LiftType>,
    ) {
        self.lift_type = lift_type;
        store.set_lift_type(day, lift_type);
    }

    /// Entries a commit should materialise for the staged day.
    pub fn entries(&self) -> impl Iterator<Item = (Activity, Option<LiftType>)> + '_ {
        self.selected.iter().map(move |&activity| {
            let lift_type = if activity.is_lift() {
                self.lift_type
            } else {
                None
            };
            (activity, lift_type)
        })
    }
}
