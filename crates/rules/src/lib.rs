//! Seasonal schedule resolution for service locations.
//!
//! This crate provides:
//! - Lifecycle classification of schedules (current, upcoming, past)
//! - Priority-based resolution of the effective schedule for a date
//! - Projection of a schedule onto a single day's working hours
//! - Integrity checks and advisory validation of a location's schedule set
//! - A filesystem loader with hot-reload via `notify` watcher
//! - The [`ScheduleBook`] facade with an LRU resolution cache

pub mod classifier;
pub mod facade;
pub mod loader;
pub mod projector;
pub mod resolver;
pub mod source;
pub mod validation;

pub use classifier::{classify, classify_today, display_status, DisplayStatus, ScheduleStatus};
pub use facade::{Candidate, Explanation, ResolutionCache, ResolvedDay, ScheduleBook, StatusEntry};
pub use loader::{ChangeHook, DirectorySource};
pub use projector::{project_date, project_day};
pub use resolver::{explain_active, next_upcoming, resolve_active, resolve_active_for_period, Resolution};
pub use source::{InMemorySource, ScheduleFilter, ScheduleSource};
pub use validation::{check_schedule_set, validate_schedule_set, ValidationResult};
