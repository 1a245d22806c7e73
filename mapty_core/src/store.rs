//! Session store: the ordered, persisted list of workouts.
//!
//! The store owns identity generation and the create/edit/delete protocol.
//! Every successful mutation writes the full collection back to the backend
//! before returning. When that write fails the error is returned, the
//! in-memory list keeps the change, and [`SessionStore::save`] can be called
//! again to retry.
//!
//! Mutators take `&mut self`; callers sharing a store across threads must
//! put it behind a single `Mutex`, since a save overwrites the whole list.

use crate::backend::PersistenceBackend;
use crate::id::IdGenerator;
use crate::record::WorkoutRecord;
use crate::workout::{Coords, Workout, WorkoutInput};
use crate::{Config, Error, Result};
use chrono::{DateTime, FixedOffset, Local};

/// Backend key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// Source of creation timestamps
pub type Clock = Box<dyn Fn() -> DateTime<FixedOffset> + Send>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Where the map should move when a workout is focused
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapFocus {
    pub coords: Coords,
    pub zoom: u8,
}

/// Field to order a sorted view by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Distance,
    Duration,
}

pub struct SessionStore<B> {
    backend: B,
    key: String,
    zoom_level: u8,
    workouts: Vec<Workout>,
    ids: IdGenerator,
    clock: Clock,
}

impl<B: PersistenceBackend> SessionStore<B> {
    /// Create an empty store over `backend` without reading it
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            key: DEFAULT_STORAGE_KEY.to_string(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            workouts: Vec::new(),
            ids: IdGenerator::new(),
            clock: Box::new(local_now),
        }
    }

    /// Create a store using the configured key and zoom level, then load it
    pub fn open(backend: B, config: &Config) -> Self {
        let mut store = Self::new(backend)
            .with_key(config.store.storage_key.clone())
            .with_zoom_level(config.map.zoom_level);
        store.load();
        store
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_zoom_level(mut self, zoom_level: u8) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Workouts in insertion order
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Largest first, or smallest first when `ascending`
    ///
    /// Only the returned view is ordered; stored order is untouched.
    pub fn sorted(&self, key: SortKey, ascending: bool) -> Vec<&Workout> {
        let mut view: Vec<&Workout> = self.workouts.iter().collect();
        view.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Date => a.created_at().cmp(&b.created_at()),
                SortKey::Distance => a.distance_km().total_cmp(&b.distance_km()),
                SortKey::Duration => a.duration_min().total_cmp(&b.duration_min()),
            };
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Validate `input`, append a new workout and persist
    pub fn create(&mut self, input: WorkoutInput) -> Result<Workout> {
        input.validate()?;

        let now = (self.clock)();
        let id = loop {
            let candidate = self.ids.next_id(&now);
            if self.find_by_id(&candidate).is_none() {
                break candidate;
            }
            tracing::debug!("Generated id {} is already held, retrying", candidate);
        };
        let workout = Workout::build(id, now, &input)?;

        tracing::info!("Created workout {} ({})", workout.id(), workout.description());
        self.workouts.push(workout.clone());
        self.save()?;
        Ok(workout)
    }

    /// Replace the workout `id` in place, keeping its id, creation time,
    /// position and click count
    pub fn edit(&mut self, id: &str, input: WorkoutInput) -> Result<Workout> {
        let index = self.position(id)?;
        let existing = &self.workouts[index];

        let replacement = Workout::build(existing.id(), existing.created_at(), &input)?
            .with_click_count(existing.click_count());

        tracing::info!("Edited workout {} ({})", id, replacement.description());
        self.workouts[index] = replacement.clone();
        self.save()?;
        Ok(replacement)
    }

    /// Remove the workout `id`
    ///
    /// An id that is not held is a no-op returning `Ok(None)` and does not
    /// write to the backend.
    pub fn delete(&mut self, id: &str) -> Result<Option<Workout>> {
        let Some(index) = self.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!("Delete of unknown workout {} ignored", id);
            return Ok(None);
        };

        let removed = self.workouts.remove(index);
        tracing::info!("Deleted workout {}", id);
        self.save()?;
        Ok(Some(removed))
    }

    /// Remove every workout and persist the empty list
    pub fn delete_all(&mut self) -> Result<()> {
        let count = self.workouts.len();
        self.workouts.clear();
        tracing::info!("Deleted all {} workouts", count);
        self.save()
    }

    /// Count one click on the workout `id` and persist
    pub fn click(&mut self, id: &str) -> Result<&Workout> {
        let index = self.position(id)?;
        self.workouts[index].click();
        self.save()?;
        Ok(&self.workouts[index])
    }

    /// Click the workout `id` and return where the map should pan to
    pub fn focus(&mut self, id: &str) -> Result<MapFocus> {
        let zoom = self.zoom_level;
        let workout = self.click(id)?;
        Ok(MapFocus {
            coords: workout.coords(),
            zoom,
        })
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the in-memory list with what the backend holds
    ///
    /// Never fails: a missing, unreadable or unparseable value gives an
    /// empty list, and individual records that cannot be decoded are
    /// skipped. Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        self.workouts.clear();

        let contents = match self.backend.get(&self.key) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::info!("No saved workouts under {:?}, starting empty", self.key);
                return 0;
            }
            Err(e) => {
                tracing::warn!("Unable to read saved workouts: {}. Starting empty.", e);
                return 0;
            }
        };

        if contents.trim().is_empty() {
            tracing::info!("Saved workouts under {:?} are empty", self.key);
            return 0;
        }

        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&contents) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Failed to parse saved workouts: {}. Starting empty.", e);
                return 0;
            }
        };

        for (index, value) in values.into_iter().enumerate() {
            let decoded = serde_json::from_value::<WorkoutRecord>(value)
                .map_err(Error::from)
                .and_then(Workout::try_from);

            match decoded {
                Ok(workout) => {
                    if self.find_by_id(workout.id()).is_some() {
                        tracing::warn!(
                            "Skipping record {}: duplicate id {}",
                            index,
                            workout.id()
                        );
                        continue;
                    }
                    self.ids.observe(workout.id());
                    self.workouts.push(workout);
                }
                Err(e) => {
                    tracing::warn!("Skipping record {}: {}", index, e);
                }
            }
        }

        tracing::info!("Loaded {} workouts", self.workouts.len());
        self.workouts.len()
    }

    /// Write the full ordered list to the backend, overwriting what was there
    pub fn save(&mut self) -> Result<()> {
        let records: Vec<WorkoutRecord> = self.workouts.iter().map(WorkoutRecord::from).collect();
        let contents = serde_json::to_string(&records).map_err(Error::persistence)?;

        self.backend.set(&self.key, &contents)?;
        tracing::debug!("Saved {} workouts under {:?}", records.len(), self.key);
        Ok(())
    }

    /// Erase persisted state and the in-memory list
    ///
    /// Ids already issued stay reserved. Reloading the presentation after a
    /// reset is up to the caller.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.remove(&self.key)?;
        self.workouts.clear();
        tracing::info!("Reset saved workouts under {:?}", self.key);
        Ok(())
    }
}

impl<B> std::fmt::Debug for SessionStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("zoom_level", &self.zoom_level)
            .field("workouts", &self.workouts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use crate::workout::{Metrics, WorkoutKind};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn jan_5() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 5, 12, 0, 0)
            .unwrap()
    }

    fn store() -> SessionStore<MemoryBackend> {
        crate::logging::init_test();
        SessionStore::new(MemoryBackend::new()).with_clock(jan_5)
    }

    fn run(distance_km: f64, duration_min: f64) -> WorkoutInput {
        WorkoutInput::running(Coords::new(51.5, -0.12), distance_km, duration_min, 170.0)
    }

    fn ride(distance_km: f64, duration_min: f64) -> WorkoutInput {
        WorkoutInput::cycling(Coords::new(48.8, 2.35), distance_km, duration_min, 250.0)
    }

    /// Backend whose writes can be switched off
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        fail_writes: bool,
        fail_removes: bool,
    }

    impl PersistenceBackend for FlakyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(Error::PersistenceUnavailable("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            if self.fail_removes {
                return Err(Error::PersistenceUnavailable("backend absent".into()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_create_appends_and_persists() {
        let mut store = store();

        let workout = store.create(run(5.0, 30.0)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.workouts()[0], workout);
        assert_eq!(workout.description(), "Running on January 5");
        assert_eq!(workout.headline_metric(), (6.0, "min/km"));

        let saved = store.backend().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains(workout.id()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = store();

        let ids: HashSet<String> = (0..50)
            .map(|i| store.create(run(1.0 + i as f64, 10.0)).unwrap().id().to_string())
            .collect();

        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = store();

        let first = store.create(run(5.0, 30.0)).unwrap();
        store.delete(first.id()).unwrap();
        let second = store.create(run(5.0, 30.0)).unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_create_rejects_zero_distance() {
        let mut store = store();
        store.create(run(5.0, 30.0)).unwrap();

        let result = store.create(WorkoutInput::running(Coords::new(0.0, 0.0), 0.0, 10.0, 5.0));

        assert!(matches!(
            result,
            Err(Error::InvalidInput { field: "distanceKm", .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cycling_speed_through_store() {
        let mut store = store();
        let workout = store.create(ride(20.0, 60.0)).unwrap();

        assert_eq!(workout.kind(), WorkoutKind::Cycling);
        assert_eq!(
            workout.metrics(),
            Metrics::Cycling {
                elevation_gain_m: 250.0,
                speed_km_per_h: 20.0
            }
        );
    }

    #[test]
    fn test_edit_preserves_identity_and_position() {
        let mut store = store();
        let first = store.create(run(5.0, 30.0)).unwrap();
        let target = store.create(run(10.0, 60.0)).unwrap();
        let last = store.create(ride(20.0, 60.0)).unwrap();
        store.click(target.id()).unwrap();

        let later = jan_5() + chrono::Duration::days(40);
        let mut store = store.with_clock(move || later);
        let edited = store.edit(target.id(), ride(30.0, 90.0)).unwrap();

        assert_eq!(edited.id(), target.id());
        assert_eq!(edited.created_at(), target.created_at());
        assert_eq!(edited.kind(), WorkoutKind::Cycling);
        assert_eq!(edited.headline_metric(), (20.0, "km/h"));
        assert_eq!(edited.description(), "Cycling on January 5");
        assert_eq!(edited.click_count(), 1);

        let ids: Vec<&str> = store.workouts().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![first.id(), target.id(), last.id()]);
        assert_eq!(store.find_by_id(target.id()), Some(&edited));
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let mut store = store();
        store.create(run(5.0, 30.0)).unwrap();

        let result = store.edit("missing", run(1.0, 1.0));
        assert!(matches!(result, Err(Error::NotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_invalid_edit_leaves_store_unchanged() {
        let mut store = store();
        let original = store.create(run(5.0, 30.0)).unwrap();

        let result = store.edit(original.id(), ride(5.0, 0.0));

        assert!(matches!(
            result,
            Err(Error::InvalidInput { field: "durationMin", .. })
        ));
        assert_eq!(store.find_by_id(original.id()), Some(&original));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = store();
        let ids: Vec<String> = (0..4)
            .map(|_| store.create(run(5.0, 30.0)).unwrap().id().to_string())
            .collect();

        let removed = store.delete(&ids[1]).unwrap();

        assert_eq!(removed.map(|w| w.id().to_string()), Some(ids[1].clone()));
        assert_eq!(store.len(), 3);
        assert!(store.find_by_id(&ids[1]).is_none());
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let mut store = SessionStore::new(FlakyBackend::default()).with_clock(jan_5);
        let workout = store.create(run(5.0, 30.0)).unwrap();
        store.delete(workout.id()).unwrap();

        // No write happens, so even a failing backend is fine
        let mut backend = store.into_backend();
        backend.fail_writes = true;
        let mut store = SessionStore::new(backend);
        assert!(store.delete(workout.id()).unwrap().is_none());
    }

    #[test]
    fn test_delete_all() {
        let mut store = store();
        store.create(run(5.0, 30.0)).unwrap();
        store.create(ride(20.0, 60.0)).unwrap();

        store.delete_all().unwrap();

        assert!(store.is_empty());
        assert_eq!(
            store.backend().get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = store();
        store.create(run(5.0, 30.0)).unwrap();
        let clicked = store.create(ride(42.2, 95.0)).unwrap();
        store.create(run(3.3, 21.7)).unwrap();
        store.click(clicked.id()).unwrap();
        store.click(clicked.id()).unwrap();

        let before = store.workouts().to_vec();
        let mut reloaded = SessionStore::new(store.into_backend());
        assert_eq!(reloaded.load(), 3);

        assert_eq!(reloaded.workouts(), &before[..]);
        assert_eq!(reloaded.workouts()[1].click_count(), 2);
    }

    #[test]
    fn test_roundtrip_through_files() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut store = SessionStore::new(FileBackend::new(temp_dir.path())).with_clock(jan_5);
        store.create(run(5.0, 30.0)).unwrap();
        store.create(ride(20.0, 60.0)).unwrap();
        let before = store.workouts().to_vec();

        let mut reloaded = SessionStore::new(FileBackend::new(temp_dir.path()));
        reloaded.load();
        assert_eq!(reloaded.workouts(), &before[..]);
    }

    #[test]
    fn test_ids_after_load_stay_unique() {
        let mut store = store();
        let existing = store.create(run(5.0, 30.0)).unwrap();

        // Same clock reading in a fresh process
        let mut reloaded = SessionStore::new(store.into_backend()).with_clock(jan_5);
        reloaded.load();
        let created = reloaded.create(run(1.0, 5.0)).unwrap();

        assert_ne!(created.id(), existing.id());
    }

    #[test]
    fn test_load_resilience() {
        crate::logging::init_test();
        for contents in ["", "   ", "null", "{ invalid json }", "{\"a\":1}", "[1, 2"] {
            let mut backend = MemoryBackend::new();
            backend.set(DEFAULT_STORAGE_KEY, contents).unwrap();

            let mut store = SessionStore::new(backend);
            assert_eq!(store.load(), 0, "contents {:?}", contents);
            assert!(store.is_empty());
        }

        let mut store = SessionStore::new(MemoryBackend::new());
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_load_skips_bad_records() {
        crate::logging::init_test();
        let contents = r#"[
            {"type":"running","id":"1","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":5,"durationMin":30,"cadenceSpm":170},
            {"type":"swimming","id":"2","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":1,"durationMin":30},
            {"type":"cycling","id":"3","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":0,"durationMin":30,"elevationGainM":10},
            {"type":"running","id":"1","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":8,"durationMin":40,"cadenceSpm":165},
            {"type":"cycling","id":"4","createdAt":"2024-01-06T12:00:00Z","coords":[1,1],
             "distanceKm":20,"durationMin":60,"elevationGainM":0}
        ]"#;
        let mut backend = MemoryBackend::new();
        backend.set(DEFAULT_STORAGE_KEY, contents).unwrap();

        let mut store = SessionStore::new(backend);
        assert_eq!(store.load(), 2);

        let ids: Vec<&str> = store.workouts().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(store.workouts()[1].kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_save_failure_keeps_memory_and_is_retryable() {
        let mut store = SessionStore::new(FlakyBackend {
            fail_writes: true,
            ..Default::default()
        })
        .with_clock(jan_5);

        let result = store.create(run(5.0, 30.0));
        assert!(matches!(result, Err(Error::PersistenceUnavailable(_))));
        assert_eq!(store.len(), 1);

        let backend = store.into_backend();
        assert!(backend.inner.is_empty());

        let mut store = SessionStore::new(FlakyBackend {
            inner: backend.inner,
            ..Default::default()
        });
        store.create(run(1.0, 1.0)).unwrap();
        store.save().unwrap();
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_failed_edit_save_keeps_edit_in_memory() {
        let mut store = SessionStore::new(FlakyBackend::default()).with_clock(jan_5);
        let original = store.create(run(5.0, 30.0)).unwrap();

        store.backend.fail_writes = true;
        let result = store.edit(original.id(), ride(20.0, 60.0));
        assert!(matches!(result, Err(Error::PersistenceUnavailable(_))));

        let held = store.find_by_id(original.id()).unwrap();
        assert_eq!(held.kind(), WorkoutKind::Cycling);
        assert_eq!(held.distance_km(), 20.0);

        store.backend.fail_writes = false;
        store.save().unwrap();
        let saved = store.backend().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"cycling\""));
        assert!(!saved.contains("\"running\""));
    }

    #[test]
    fn test_failed_delete_all_save_keeps_memory_cleared() {
        let mut store = SessionStore::new(FlakyBackend::default()).with_clock(jan_5);
        store.create(run(5.0, 30.0)).unwrap();
        store.create(ride(20.0, 60.0)).unwrap();

        store.backend.fail_writes = true;
        let result = store.delete_all();
        assert!(matches!(result, Err(Error::PersistenceUnavailable(_))));
        assert!(store.is_empty());

        store.backend.fail_writes = false;
        store.save().unwrap();
        assert_eq!(
            store.backend().get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_failed_reset_leaves_workouts_in_place() {
        let mut store = SessionStore::new(FlakyBackend::default()).with_clock(jan_5);
        let workout = store.create(run(5.0, 30.0)).unwrap();

        store.backend.fail_removes = true;
        let result = store.reset();

        assert!(matches!(result, Err(Error::PersistenceUnavailable(_))));
        assert_eq!(store.workouts(), &[workout][..]);
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_create_after_loading_largest_id() {
        crate::logging::init_test();
        let fallback_id = format!("{}-1", jan_5().timestamp_millis());
        let contents = format!(
            r#"[
            {{"type":"running","id":"{}","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":5,"durationMin":30,"cadenceSpm":170}},
            {{"type":"running","id":"{}","createdAt":"2024-01-05T12:00:00Z","coords":[0,0],
             "distanceKm":6,"durationMin":30,"cadenceSpm":170}}
        ]"#,
            u64::MAX,
            fallback_id
        );
        let mut backend = MemoryBackend::new();
        backend.set(DEFAULT_STORAGE_KEY, &contents).unwrap();

        let mut store = SessionStore::new(backend).with_clock(jan_5);
        assert_eq!(store.load(), 2);

        let first = store.create(run(1.0, 5.0)).unwrap();
        let second = store.create(run(2.0, 10.0)).unwrap();

        let ids: HashSet<&str> = store.workouts().iter().map(|w| w.id()).collect();
        assert_eq!(ids.len(), 4);
        assert_ne!(first.id(), fallback_id);
        assert_ne!(second.id(), u64::MAX.to_string());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = store();
        let workout = store.create(run(5.0, 30.0)).unwrap();

        store.reset().unwrap();

        assert!(store.is_empty());
        assert!(store.backend().is_empty());

        let next = store.create(run(5.0, 30.0)).unwrap();
        assert_ne!(next.id(), workout.id());
    }

    #[test]
    fn test_focus_counts_clicks() {
        let mut store = store().with_zoom_level(15);
        let workout = store.create(ride(20.0, 60.0)).unwrap();

        let focus = store.focus(workout.id()).unwrap();
        assert_eq!(
            focus,
            MapFocus {
                coords: Coords::new(48.8, 2.35),
                zoom: 15
            }
        );
        assert_eq!(store.find_by_id(workout.id()).unwrap().click_count(), 1);

        assert!(matches!(store.focus("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_sorted_view_leaves_order_alone() {
        let mut store = store();
        let short = store.create(run(3.0, 20.0)).unwrap();
        let long = store.create(ride(40.0, 90.0)).unwrap();
        let mid = store.create(run(10.0, 50.0)).unwrap();

        let by_distance: Vec<&str> = store
            .sorted(SortKey::Distance, false)
            .iter()
            .map(|w| w.id())
            .collect();
        assert_eq!(by_distance, vec![long.id(), mid.id(), short.id()]);

        let by_duration: Vec<&str> = store
            .sorted(SortKey::Duration, true)
            .iter()
            .map(|w| w.id())
            .collect();
        assert_eq!(by_duration, vec![short.id(), mid.id(), long.id()]);

        let stored: Vec<&str> = store.workouts().iter().map(|w| w.id()).collect();
        assert_eq!(stored, vec![short.id(), long.id(), mid.id()]);
    }

    #[test]
    fn test_open_uses_config() {
        let mut config = Config::default();
        config.store.storage_key = "trips".into();
        config.map.zoom_level = 9;

        let mut store = SessionStore::open(MemoryBackend::new(), &config).with_clock(jan_5);
        let workout = store.create(run(5.0, 30.0)).unwrap();

        assert!(store.backend().get("trips").unwrap().is_some());
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert_eq!(store.focus(workout.id()).unwrap().zoom, 9);

        let reopened = SessionStore::open(store.into_backend(), &config);
        assert_eq!(reopened.len(), 1);
    }
}
