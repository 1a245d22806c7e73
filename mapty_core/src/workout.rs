//! Workout domain model.
//!
//! A workout is either a run or a ride. Both share the pin coordinates,
//! distance and duration; each variant carries its own input metric and
//! the metric derived from it:
//! - Running: cadence (steps/min) and pace (min/km)
//! - Cycling: elevation gain (m) and speed (km/h)
//!
//! Derived values are computed when a workout is built and are only exposed
//! through getters, so they cannot drift from their inputs.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ============================================================================
// Variant tag and coordinates
// ============================================================================

/// Which kind of workout a record holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag used in persisted records
    pub fn tag(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♂️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WorkoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(Error::invalid(
                "type",
                format!("unknown workout type {:?}", other),
            )),
        }
    }
}

/// A map pin, stored exactly as supplied
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

// ============================================================================
// Input
// ============================================================================

/// Variant-specific input metric
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Activity {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

impl Activity {
    /// Pair a kind with its extra field value
    pub fn new(kind: WorkoutKind, extra: f64) -> Self {
        match kind {
            WorkoutKind::Running => Activity::Running { cadence_spm: extra },
            WorkoutKind::Cycling => Activity::Cycling {
                elevation_gain_m: extra,
            },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Everything a caller supplies to create or edit a workout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkoutInput {
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    pub activity: Activity,
}

impl WorkoutInput {
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self {
            coords,
            distance_km,
            duration_min,
            activity: Activity::Running { cadence_spm },
        }
    }

    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self {
            coords,
            distance_km,
            duration_min,
            activity: Activity::Cycling { elevation_gain_m },
        }
    }

    /// Build input from raw form values
    ///
    /// Every number must parse and be finite; range checks happen in
    /// [`WorkoutInput::validate`].
    pub fn parse(
        kind: &str,
        coords: Coords,
        distance_km: &str,
        duration_min: &str,
        extra: &str,
    ) -> Result<Self> {
        let kind: WorkoutKind = kind.parse()?;
        let extra_field = match kind {
            WorkoutKind::Running => "cadenceSpm",
            WorkoutKind::Cycling => "elevationGainM",
        };

        let input = Self {
            coords,
            distance_km: parse_number("distanceKm", distance_km)?,
            duration_min: parse_number("durationMin", duration_min)?,
            activity: Activity::new(kind, parse_number(extra_field, extra)?),
        };
        input.validate()?;
        Ok(input)
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    /// Check every numeric precondition, naming the first offending field
    pub fn validate(&self) -> Result<()> {
        require_finite("lat", self.coords.lat)?;
        require_finite("lng", self.coords.lng)?;
        require_positive("distanceKm", self.distance_km)?;
        require_positive("durationMin", self.duration_min)?;
        match self.activity {
            Activity::Running { cadence_spm } => require_positive("cadenceSpm", cadence_spm),
            Activity::Cycling { elevation_gain_m } => {
                require_non_negative("elevationGainM", elevation_gain_m)
            }
        }
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(field, format!("{:?} is not a number", raw)))?;
    require_finite(field, value)?;
    Ok(value)
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("{} is not finite", value)))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("{} must be positive", value)))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("{} must not be negative", value)))
    }
}

// ============================================================================
// Workout
// ============================================================================

/// Variant input together with its derived metric
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Metrics {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl Metrics {
    fn derive(distance_km: f64, duration_min: f64, activity: Activity) -> Self {
        match activity {
            Activity::Running { cadence_spm } => Metrics::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
            Activity::Cycling { elevation_gain_m } => Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        }
    }

    /// Reject a derived value that over- or underflowed to infinity
    fn check_finite(self) -> Result<Self> {
        let (field, value) = match self {
            Metrics::Running { pace_min_per_km, .. } => ("paceMinPerKm", pace_min_per_km),
            Metrics::Cycling { speed_km_per_h, .. } => ("speedKmPerH", speed_km_per_h),
        };
        if value.is_finite() {
            Ok(self)
        } else {
            Err(Error::invalid(field, "distance and duration give no finite value"))
        }
    }
}

/// A single recorded workout
#[derive(Clone, Debug, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    click_count: u32,
    description: String,
    metrics: Metrics,
}

impl Workout {
    /// Validate `input` and build a workout with the given identity
    ///
    /// The store supplies `id` and `created_at`: fresh ones on create, the
    /// existing ones on edit or when reading persisted records.
    pub fn build(
        id: impl Into<String>,
        created_at: DateTime<FixedOffset>,
        input: &WorkoutInput,
    ) -> Result<Self> {
        input.validate()?;
        let metrics =
            Metrics::derive(input.distance_km, input.duration_min, input.activity).check_finite()?;

        let kind = input.kind();
        Ok(Self {
            id: id.into(),
            created_at,
            coords: input.coords,
            distance_km: input.distance_km,
            duration_min: input.duration_min,
            click_count: 0,
            description: describe(kind, created_at),
            metrics,
        })
    }

    pub(crate) fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    /// Record one focus interaction
    pub fn click(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.metrics {
            Metrics::Running { .. } => WorkoutKind::Running,
            Metrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// The input this workout was built from
    pub fn input(&self) -> WorkoutInput {
        let activity = match self.metrics {
            Metrics::Running { cadence_spm, .. } => Activity::Running { cadence_spm },
            Metrics::Cycling {
                elevation_gain_m, ..
            } => Activity::Cycling { elevation_gain_m },
        };
        WorkoutInput {
            coords: self.coords,
            distance_km: self.distance_km,
            duration_min: self.duration_min,
            activity,
        }
    }

    /// Pace for runs, speed for rides, with unit
    pub fn headline_metric(&self) -> (f64, &'static str) {
        match self.metrics {
            Metrics::Running {
                pace_min_per_km, ..
            } => (pace_min_per_km, "min/km"),
            Metrics::Cycling { speed_km_per_h, .. } => (speed_km_per_h, "km/h"),
        }
    }

    /// Cadence for runs, elevation gain for rides, with unit
    pub fn detail_metric(&self) -> (f64, &'static str) {
        match self.metrics {
            Metrics::Running { cadence_spm, .. } => (cadence_spm, "spm"),
            Metrics::Cycling {
                elevation_gain_m, ..
            } => (elevation_gain_m, "m"),
        }
    }
}

/// `"<Type> on <Month> <day>"` in the timestamp's own offset
fn describe(kind: WorkoutKind, created_at: DateTime<FixedOffset>) -> String {
    format!(
        "{} on {} {}",
        kind.label(),
        MONTHS[created_at.month0() as usize],
        created_at.day()
    )
}
