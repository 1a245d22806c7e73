#![forbid(unsafe_code)]

//! Core domain model and session store for the Mapty workout tracker.
//!
//! This crate provides:
//! - Workout types (running, cycling) with derived pace/speed and description
//! - Identity generation
//! - The session store with create/edit/delete and write-through persistence
//! - Persistence backends (in-memory, JSON file)
//! - Configuration and logging setup

pub mod error;
pub mod config;
pub mod logging;
pub mod workout;
pub mod id;
pub mod backend;
mod record;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::Config;
pub use workout::{Activity, Coords, Metrics, Workout, WorkoutInput, WorkoutKind};
pub use backend::{FileBackend, MemoryBackend, PersistenceBackend};
pub use store::{MapFocus, SessionStore, SortKey};
