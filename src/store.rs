//src/store.rs
use chrono::NaiveDateTime;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

use crate::calendar::same_day;

/// The fixed set of trackable activities, in button order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Activity {
    Stretch,
    Cycle,
    Swim,
    Lift,
    Walk,
    Ball,
}

impl Activity {
    pub const fn is_lift(self) -> bool {
        matches!(self, Activity::Lift)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum LiftType {
    Push,
    Pull,
    Legs,
    #[strum(to_string = "Full body", serialize = "full-body", serialize = "fullbody")]
    FullBody,
}

/// Parses the subtype selector's text; the empty string means "unset".
pub fn parse_lift_type(input: &str) -> Result<Option<LiftType>, strum::ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Opaque identifier, unique within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutId(u64);

impl WorkoutId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text detail fields editable from the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WorkoutField {
    Duration,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutId,
    pub activity: Activity,
    pub date: NaiveDateTime, // Any instant inside the workout's day
    pub lift_type: Option<LiftType>, // Only ever Some for Lift
    pub duration: String,
    pub notes: String,
}

impl Workout {
    fn fresh(id: WorkoutId, activity: Activity, day: NaiveDateTime, lift: Option<LiftType>) -> Self {
        Self {
            id,
            activity,
            date: day,
            lift_type: if activity.is_lift() { lift } else { None },
            duration: String::new(),
            notes: String::new(),
        }
    }

    fn matches(&self, activity: Activity, day: NaiveDateTime) -> bool {
        self.activity == activity && same_day(self.date, day)
    }
}

/// Authoritative, in-memory collection of workouts.
///
/// Holds at most one workout per (activity, calendar day).
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    last_id: u64,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> WorkoutId {
        self.last_id += 1;
        WorkoutId(self.last_id)
    }

    /// Replaces whatever occupies the (activity, day) slot with a fresh record.
    /// Duration and notes of the replaced record are dropped.
    pub fn upsert(
        &mut self,
        activity: Activity,
        day: NaiveDateTime,
        lift_type: Option<LiftType>,
    ) -> WorkoutId {
        self.workouts.retain(|w| !w.matches(activity, day));
        let id = self.next_id();
        self.workouts.push(Workout::fresh(id, activity, day, lift_type));
        debug!(%id, %activity, day = %day.date(), "upserted workout");
        id
    }

    /// Deletes the (activity, day) record. Returns whether one existed.
    pub fn remove(&mut self, activity: Activity, day: NaiveDateTime) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| !w.matches(activity, day));
        let removed = self.workouts.len() != before;
        if removed {
            debug!(%activity, day = %day.date(), "removed workout");
        }
        removed
    }

    pub fn workouts_on(&self, day: NaiveDateTime) -> Vec<&Workout> {
        self.workouts
            .iter()
            .filter(|w| same_day(w.date, day))
            .collect()
    }

    pub fn lift_on(&self, day: NaiveDateTime) -> Option<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.matches(Activity::Lift, day))
    }

    pub fn get(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Edits a detail field in place. Unknown ids are ignored; the record may
    /// have been replaced by an upsert since the caller read it.
    pub fn set_field(&mut self, id: WorkoutId, field: WorkoutField, value: &str) -> bool {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id == id) else {
            warn!(%id, %field, "ignoring edit of missing workout");
            return false;
        };
        match field {
            WorkoutField::Duration => workout.duration = value.to_string(),
            WorkoutField::Notes => workout.notes = value.to_string(),
        }
        true
    }

    /// Changes the subtype of the day's Lift in place, keeping its id and details.
    pub fn set_lift_type(&mut self, day: NaiveDateTime, lift_type: Option<LiftType>) -> bool {
        match self
            .workouts
            .iter_mut()
            .find(|w| w.matches(Activity::Lift, day))
        {
            Some(lift) => {
                lift.lift_type = lift_type;
                debug!(id = %lift.id, ?lift_type, "retyped lift");
                true
            }
            None => false,
        }
    }

    /// Drops every workout on `day` and inserts one fresh record per entry.
    pub fn replace_day<I>(&mut self, day: NaiveDateTime, entries: I) -> Vec<WorkoutId>
    where
        I: IntoIterator<Item = (Activity, Option<LiftType>)>,
    {
        self.workouts.retain(|w| !same_day(w.date, day));
        let mut ids = Vec::new();
        for (activity, lift_type) in entries {
            // One record per activity even if an entry repeats.
            self.workouts.retain(|w| !w.matches(activity, day));
            let id = self.next_id();
            self.workouts.push(Workout::fresh(id, activity, day, lift_type));
            ids.push(id);
        }
        debug!(day = %day.date(), count = ids.len(), "rebuilt day");
        ids
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn upsert_replaces_same_slot_and_resets_details() {
        let mut store = WorkoutStore::new();
        let first = store.upsert(Activity::Swim, day(14, 8), None);
        assert!(store.set_field(first, WorkoutField::Notes, "1km"));

        let second = store.upsert(Activity::Swim, day(14, 20), None);
        assert_ne!(first, second);
        assert_eq!(store.len(), 1);
        assert!(store.get(first).is_none());
        assert_eq!(store.get(second).unwrap().notes, "");
    }

    #[test]
    fn distinct_activities_coexist_on_one_day() {
        let mut store = WorkoutStore::new();
        store.upsert(Activity::Walk, day(14, 8), None);
        store.upsert(Activity::Ball, day(14, 9), None);
        store.upsert(Activity::Walk, day(15, 9), None);
        assert_eq!(store.workouts_on(day(14, 23)).len(), 2);
        assert_eq!(store.workouts_on(day(15, 0)).len(), 1);
    }

    #[test]
    fn subtype_only_kept_for_lift() {
        let mut store = WorkoutStore::new();
        let id = store.upsert(Activity::Cycle, day(14, 8), Some(LiftType::Pull));
        assert_eq!(store.get(id).unwrap().lift_type, None);
    }

    #[test]
    fn remove_and_set_field_tolerate_missing_targets() {
        let mut store = WorkoutStore::new();
        assert!(!store.remove(Activity::Lift, day(14, 8)));
        assert!(!store.set_field(WorkoutId::new(42), WorkoutField::Duration, "30m"));
        assert!(!store.set_lift_type(day(14, 8), Some(LiftType::Legs)));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_day_leaves_other_days_alone() {
        let mut store = WorkoutStore::new();
        store.upsert(Activity::Walk, day(14, 8), None);
        store.upsert(Activity::Swim, day(14, 8), None);
        let kept = store.upsert(Activity::Swim, day(13, 8), None);

        let ids = store.replace_day(day(14, 12), [(Activity::Lift, Some(LiftType::Push))]);
        assert_eq!(ids.len(), 1);
        let on_day = store.workouts_on(day(14, 0));
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].lift_type, Some(LiftType::Push));
        assert!(store.get(kept).is_some());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("lift".parse::<Activity>().unwrap(), Activity::Lift);
        assert_eq!(parse_lift_type("Full body").unwrap(), Some(LiftType::FullBody));
        assert_eq!(parse_lift_type("full-body").unwrap(), Some(LiftType::FullBody));
        assert_eq!(parse_lift_type("").unwrap(), None);
        assert!(parse_lift_type("squat").is_err());
        assert_eq!(LiftType::FullBody.to_string(), "Full body");
        assert_eq!("NOTES".parse::<WorkoutField>().unwrap(), WorkoutField::Notes);
    }
}
