//! Schedule collection facade: the entry point collaborators call.
//!
//! [`ScheduleBook`] fetches a location's records through a
//! [`ScheduleSource`](crate::source::ScheduleSource), rejects malformed sets,
//! and runs classification, resolution and projection on demand. Results can
//! optionally be memoised per `(location, date)` in a [`ResolutionCache`]
//! whose invalidation is left to the caller.

mod book;
mod cache;
mod resolved;


pub use self::book::ScheduleBook;
pub use self::cache::ResolutionCache;
pub use self::resolved::{Candidate, Explanation, ResolvedDay, StatusEntry};
