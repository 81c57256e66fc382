//! Directory-backed schedule source with hot-reload via `notify` watcher.
//!
//! Each `*.yml` / `*.yaml` file under the schedules directory holds one
//! [`ScheduleRecord`](seasonal_core::ScheduleRecord). Records are keyed by the
//! file they were loaded from, so ids only need to be unique per location;
//! collisions surface as integrity errors when the location is resolved.

mod core;
mod error;
mod watcher;


pub use self::core::{ChangeHook, DirectorySource};
pub use self::error::{LoadError, LoadResult, LoadStatus, Result};
