//! Domain entities.
//!
//! Simple data structs with public fields: a location document and the reviews
//! it embeds.

mod location;
mod review;

pub use location::{Coords, Location, LocationDraft, OpeningTime};
pub use review::Review;
