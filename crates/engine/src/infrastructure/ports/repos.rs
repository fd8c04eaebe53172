//! Repository port traits for database access.

use async_trait::async_trait;
use loc8r_domain::{Coords, Location, LocationDraft, LocationId, Review};

use super::error::RepoError;
use super::types::{GeoMatch, LocationFields};

// =============================================================================
// Document Store
// =============================================================================

/// Location documents with their embedded reviews.
///
/// Writes are partial: each `save_*` touches only the fields it names, so a
/// location fetched with a narrow projection can be saved without clobbering
/// the fields that were left out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    /// Nearest-first spherical proximity search. `max_distance` and the
    /// returned distances are central angles in radians.
    async fn find_near(
        &self,
        near: Coords,
        max_distance: f64,
        limit: u32,
    ) -> Result<Vec<GeoMatch>, RepoError>;

    async fn get(
        &self,
        id: LocationId,
        fields: LocationFields,
    ) -> Result<Option<Location>, RepoError>;

    /// Insert a new location; the store assigns its id.
    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError>;

    /// Persist name, address, facilities, coords and opening times.
    async fn save_details(&self, location: &Location) -> Result<(), RepoError>;

    /// Replace the embedded review list.
    async fn save_reviews(&self, id: LocationId, reviews: &[Review]) -> Result<(), RepoError>;

    async fn save_rating(&self, id: LocationId, rating: i32) -> Result<(), RepoError>;
}
