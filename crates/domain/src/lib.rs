//! Loc8r domain types.
//!
//! Locations (venues with coordinates and opening hours) own an ordered list of
//! embedded reviews. Everything in this crate is pure: no I/O, no async.

pub mod common;
pub mod entities;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rating;

pub use entities::{Coords, Location, LocationDraft, OpeningTime, Review};
pub use error::DomainError;
pub use geo::{radians_to_km, EARTH_RADIUS_KM};
pub use ids::{LocationId, ReviewId};
pub use rating::average_rating;
