//! Active-schedule resolution with priority overrides.
//!
//! Among the active records whose range covers a date, the one with the
//! highest precedence wins. Precedence is a total order (see [`precedence`]),
//! so the outcome never depends on the order records were fetched in.
//!
//! Everything here is pure and assumes well-formed input; malformed records
//! are rejected upstream by [`crate::validation::check_schedule_set`].

mod core;
mod precedence;

#[cfg(test)]
mod tests;

pub use self::core::{
    explain_active, next_upcoming, resolve_active, resolve_active_for_period, Resolution,
};
pub use self::precedence::{precedence, rank};
