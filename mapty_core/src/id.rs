//! Workout identity generation.
//!
//! Ids are the creation time in epoch milliseconds, rendered as a decimal
//! string. A monotonic floor bumps the value whenever the clock has not
//! moved past the last id issued or loaded, so two workouts created in the
//! same millisecond (or after the clock steps backwards) still get distinct
//! ids, and ids of deleted workouts are never handed out again by the same
//! generator.
//!
//! Once the floor sits at `u64::MAX` numeric ids are exhausted and ids take
//! the form `<millis>-<n>`. Such an id may match a loaded one, so callers
//! skip ids they already hold.

use chrono::{DateTime, TimeZone};

#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    floor: u64,
    overflow: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the floor past an id that already exists
    ///
    /// Ids that are not decimal numbers cannot collide with generated ones
    /// and are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.floor = self.floor.max(value);
        }
    }

    /// Issue a fresh id for a workout created at `now`
    pub fn next_id<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.floor.checked_add(1) {
            Some(next) => {
                let value = millis.max(next);
                self.floor = value;
                value.to_string()
            }
            None => {
                self.overflow = self.overflow.wrapping_add(1);
                format!("{}-{}", millis, self.overflow)
            }
        }
    }
}
