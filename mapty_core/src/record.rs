//! Persisted record layout.
//!
//! The stored collection is a JSON array of objects tagged by `type`:
//!
//! ```json
//! {"type":"running","id":"1704456000000","createdAt":"2024-01-05T12:00:00+00:00",
//!  "coords":[51.5,-0.12],"distanceKm":5.0,"durationMin":30.0,"clickCount":0,
//!  "description":"Running on January 5","cadenceSpm":170.0,"paceMinPerKm":6.0}
//! ```
//!
//! `clickCount`, `description` and the derived metric are optional when
//! reading so older data still loads. Derived values are always recomputed
//! from the inputs on read.

use crate::workout::{Coords, Metrics, Workout, WorkoutInput};
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Fields shared by both variants
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommonRecord {
    pub id: String,
    pub created_at: DateTime<FixedOffset>,
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(default)]
    pub click_count: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunningRecord {
    #[serde(flatten)]
    pub common: CommonRecord,
    pub cadence_spm: f64,
    #[serde(default)]
    pub pace_min_per_km: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CyclingRecord {
    #[serde(flatten)]
    pub common: CommonRecord,
    pub elevation_gain_m: f64,
    #[serde(default)]
    pub speed_km_per_h: Option<f64>,
}

/// One persisted workout, decoded by its `type` tag
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum WorkoutRecord {
    Running(RunningRecord),
    Cycling(CyclingRecord),
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let common = CommonRecord {
            id: workout.id().to_string(),
            created_at: workout.created_at(),
            coords: workout.coords(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            click_count: workout.click_count(),
            description: Some(workout.description().to_string()),
        };

        match workout.metrics() {
            Metrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => WorkoutRecord::Running(RunningRecord {
                common,
                cadence_spm,
                pace_min_per_km: Some(pace_min_per_km),
            }),
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => WorkoutRecord::Cycling(CyclingRecord {
                common,
                elevation_gain_m,
                speed_km_per_h: Some(speed_km_per_h),
            }),
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = Error;

    fn try_from(record: WorkoutRecord) -> Result<Self> {
        let (common, input, stored_metric) = match record {
            WorkoutRecord::Running(r) => {
                let input = WorkoutInput::running(
                    r.common.coords,
                    r.common.distance_km,
                    r.common.duration_min,
                    r.cadence_spm,
                );
                (r.common, input, r.pace_min_per_km)
            }
            WorkoutRecord::Cycling(r) => {
                let input = WorkoutInput::cycling(
                    r.common.coords,
                    r.common.distance_km,
                    r.common.duration_min,
                    r.elevation_gain_m,
                );
                (r.common, input, r.speed_km_per_h)
            }
        };

        let workout = Workout::build(common.id, common.created_at, &input)?
            .with_click_count(common.click_count);

        if let Some(stored) = stored_metric {
            let (derived, unit) = workout.headline_metric();
            if stored != derived {
                tracing::debug!(
                    "Workout {}: stored {} {} replaced by {}",
                    workout.id(),
                    stored,
                    unit,
                    derived
                );
            }
        }
        if let Some(stored) = common.description.as_deref() {
            if stored != workout.description() {
                tracing::debug!(
                    "Workout {}: stored description {:?} replaced by {:?}",
                    workout.id(),
                    stored,
                    workout.description()
                );
            }
        }

        Ok(workout)
    }
}
