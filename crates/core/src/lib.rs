pub mod config;
pub mod error;
pub mod hours;
pub mod schedule;

pub use config::Config;
pub use error::*;
pub use hours::*;
pub use schedule::*;
