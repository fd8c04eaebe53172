//! Use cases - request orchestration.
//!
//! Each module handles one resource. Use cases validate parameters, call the
//! location repository and reshape results; they know nothing about HTTP.

mod form;
pub mod locations;
pub mod rating;
pub mod reviews;

use loc8r_domain::{DomainError, LocationId};

use crate::infrastructure::ports::RepoError;

pub use locations::{DistanceQuery, LocationForm, LocationSummary, LocationUseCases};
pub use rating::RatingRecalculator;
pub use reviews::{ReviewForm, ReviewUseCases, ReviewWithLocation};

pub const MISSING_DISTANCE_PARAMS: &str =
    "lng, lat and maxDistance query parameters are all required";
pub const MISSING_LOCATION_ID: &str = "No locationid in request";
pub const MISSING_LOCATION_ID_FOR_UPDATE: &str = "Not found, locationid is required";
pub const MISSING_LOCATION_ID_FOR_REVIEW: &str = "Not found, locationid required";
pub const MISSING_REVIEW_PARAMS: &str = "Not found, locationid and reviewid are both required";
pub const LOCATION_NOT_FOUND: &str = "locationid not found";
pub const REVIEW_NOT_FOUND: &str = "reviewid not found";
pub const NO_REVIEWS_FOUND: &str = "No reviews found";
pub const NO_REVIEW_TO_UPDATE: &str = "No review to update";
pub const NO_REVIEW_TO_DELETE: &str = "No review to delete";

/// Errors returned by request use cases.
///
/// `Fetch` and `Save` carry the store error unchanged; which status they map
/// to depends on the endpoint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    MissingParams(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Fetch failed: {0}")]
    Fetch(#[source] RepoError),
    #[error("Save failed: {0}")]
    Save(#[source] RepoError),
}

impl RequestError {
    /// A field that could not be cast for persistence.
    pub(crate) fn invalid_field(e: DomainError) -> Self {
        Self::Save(RepoError::constraint(e))
    }
}

/// A path parameter, or `None` when it is empty.
pub(crate) fn required(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse a location id for a lookup. An id that cannot name any document is
/// treated as not found.
pub(crate) fn lookup_location_id(raw: &str) -> Result<LocationId, RequestError> {
    raw.parse()
        .map_err(|_| RequestError::NotFound(LOCATION_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_params() {
        assert_eq!(required(""), None);
        assert_eq!(required("  "), None);
        assert_eq!(required(" abc "), Some("abc"));
    }

    #[test]
    fn malformed_location_id_is_not_found() {
        assert_eq!(
            lookup_location_id("not-an-id"),
            Err(RequestError::NotFound(LOCATION_NOT_FOUND))
        );
        let id = LocationId::new();
        assert_eq!(lookup_location_id(&id.to_string()), Ok(id));
    }

    #[test]
    fn invalid_field_is_a_save_constraint() {
        let err = RequestError::invalid_field(DomainError::validation("facilities is required"));
        assert!(matches!(err, RequestError::Save(RepoError::ConstraintViolation(_))));
    }
}
