//! Value types that cross the repository port.

use loc8r_domain::Location;

/// A proximity search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    /// Distance from the search point, in radians.
    pub distance: f64,
    pub location: Location,
}

/// Which fields a location fetch returns. Excluded fields come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationFields {
    All,
    /// Everything except `reviews` and `rating`.
    WithoutReviews,
    Reviews,
    NameAndReviews,
    RatingAndReviews,
}

impl LocationFields {
    pub fn includes_reviews(self) -> bool {
        !matches!(self, Self::WithoutReviews)
    }

    pub fn includes_rating(self) -> bool {
        matches!(self, Self::All | Self::RatingAndReviews)
    }

    pub fn includes_name(self) -> bool {
        matches!(self, Self::All | Self::WithoutReviews | Self::NameAndReviews)
    }

    pub fn includes_details(self) -> bool {
        matches!(self, Self::All | Self::WithoutReviews)
    }
}
