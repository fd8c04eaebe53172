//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document store access (MongoDB in production, in-memory for tests and local runs)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use repos::LocationRepo;
pub use types::{GeoMatch, LocationFields};

#[cfg(test)]
pub use repos::MockLocationRepo;

pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;

pub use error::RepoError;
