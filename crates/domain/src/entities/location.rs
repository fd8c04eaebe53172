//! Location entity - a venue with coordinates, opening hours and reviews.
//!
//! Reviews are embedded in the location document and have no existence of
//! their own. `rating` is derived from them (see [`crate::rating`]).

use serde::{Deserialize, Serialize};

use crate::common::{cast_bool, parse_float};
use crate::entities::Review;
use crate::error::DomainError;
use crate::ids::{LocationId, ReviewId};

/// Geographic position, stored as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lng: f64,
    pub lat: f64,
}

impl Coords {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Build from raw text fields. Unparseable values become NaN, which the
    /// store's geospatial index refuses.
    pub fn from_fields(lng: Option<&str>, lat: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(parse_float).unwrap_or(f64::NAN);
        Self::new(parse(lng), parse(lat))
    }

    /// True when both values are finite and within longitude/latitude range.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lng, coords.lat]
    }
}

/// One opening-hours block, e.g. "Monday - Friday, 7:00am - 7:00pm".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

impl OpeningTime {
    /// Build from raw text fields; `closed_field` names the field in errors.
    pub fn from_fields(
        days: Option<&str>,
        opening: Option<&str>,
        closing: Option<&str>,
        closed: Option<&str>,
        closed_field: &str,
    ) -> Result<Self, DomainError> {
        let closed = closed.map(|raw| cast_bool(closed_field, raw)).transpose()?;
        Ok(Self {
            days: days.map(str::to_string),
            opening: opening.map(str::to_string),
            closing: closing.map(str::to_string),
            closed,
        })
    }
}

/// The client-editable part of a location, as submitted on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub facilities: Vec<String>,
    pub coords: Coords,
    pub opening_times: [OpeningTime; 2],
}

/// A location document.
///
/// Fields excluded by a store projection come back empty (`reviews`) or
/// `None` (`rating`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub facilities: Vec<String>,
    pub coords: Coords,
    pub opening_times: [OpeningTime; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Location {
    /// A freshly stored location: no rating, no reviews.
    pub fn from_draft(id: LocationId, draft: LocationDraft) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            facilities: draft.facilities,
            coords: draft.coords,
            opening_times: draft.opening_times,
            rating: None,
            reviews: Vec::new(),
        }
    }

    /// Overwrite every client-editable field. Rating and reviews are untouched.
    pub fn apply_draft(&mut self, draft: LocationDraft) {
        self.name = draft.name;
        self.address = draft.address;
        self.facilities = draft.facilities;
        self.coords = draft.coords;
        self.opening_times = draft.opening_times;
    }

    pub fn review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn review_mut(&mut self, id: ReviewId) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|r| r.id == id)
    }

    /// Append a review and return the stored copy (always the last element).
    pub fn push_review(&mut self, review: Review) -> &Review {
        self.reviews.push(review);
        let last = self.reviews.len() - 1;
        &self.reviews[last]
    }

    pub fn remove_review(&mut self, id: ReviewId) -> Option<Review> {
        let index = self.reviews.iter().position(|r| r.id == id)?;
        Some(self.reviews.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn draft() -> LocationDraft {
        LocationDraft {
            name: "Starcups".into(),
            address: "125 High Street, Reading, RG6 1PS".into(),
            facilities: vec!["Hot drinks".into(), "Wifi".into()],
            coords: Coords::new(-0.9690884, 51.455041),
            opening_times: [
                OpeningTime {
                    days: Some("Monday - Friday".into()),
                    opening: Some("7:00am".into()),
                    closing: Some("7:00pm".into()),
                    closed: Some(false),
                },
                OpeningTime {
                    days: Some("Sunday".into()),
                    closed: Some(true),
                    ..OpeningTime::default()
                },
            ],
        }
    }

    fn review(author: &str, rating: i32) -> Review {
        Review::new(author, rating, "text", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn coords_serialize_lng_first() {
        let json = serde_json::to_value(Coords::new(-0.96, 51.45)).unwrap();
        assert_eq!(json, serde_json::json!([-0.96, 51.45]));
    }

    #[test]
    fn coords_from_unparseable_fields_are_invalid() {
        let coords = Coords::from_fields(Some("-0.9"), None);
        assert_eq!(coords.lng, -0.9);
        assert!(coords.lat.is_nan());
        assert!(!coords.is_valid());
        assert!(Coords::new(-0.9, 51.4).is_valid());
        assert!(!Coords::new(200.0, 51.4).is_valid());
    }

    #[test]
    fn opening_time_casts_closed_flag() {
        let time = OpeningTime::from_fields(Some("Saturday"), None, None, Some("true"), "closed2")
            .unwrap();
        assert_eq!(time.closed, Some(true));
        assert_eq!(time.opening, None);

        let err = OpeningTime::from_fields(None, None, None, Some("maybe"), "closed2").unwrap_err();
        assert!(err.to_string().contains("closed2"));
    }

    #[test]
    fn serializes_document_shape() {
        let location = Location::from_draft(LocationId::new(), draft());
        let json = serde_json::to_value(&location).unwrap();

        assert_eq!(json["_id"], location.id.to_string());
        assert_eq!(json["coords"], serde_json::json!([-0.9690884, 51.455041]));
        assert_eq!(json["openingTimes"].as_array().unwrap().len(), 2);
        assert_eq!(json["openingTimes"][1]["closed"], true);
        assert!(json.get("rating").is_none());
        assert_eq!(json["reviews"], serde_json::json!([]));
    }

    #[test]
    fn apply_draft_keeps_rating_and_reviews() {
        let mut location = Location::from_draft(LocationId::new(), draft());
        location.rating = Some(4);
        location.push_review(review("Simon", 4));

        let mut changed = draft();
        changed.name = "Costy".into();
        changed.facilities = vec!["Food".into()];
        location.apply_draft(changed);

        assert_eq!(location.name, "Costy");
        assert_eq!(location.facilities, vec!["Food".to_string()]);
        assert_eq!(location.rating, Some(4));
        assert_eq!(location.reviews.len(), 1);
    }

    #[test]
    fn push_review_returns_last_element() {
        let mut location = Location::from_draft(LocationId::new(), draft());
        location.push_review(review("Simon", 4));
        let appended = location.push_review(review("Charlie", 2)).clone();

        assert_eq!(location.reviews.last(), Some(&appended));
        assert_eq!(appended.author, "Charlie");
    }

    #[test]
    fn remove_review_by_id() {
        let mut location = Location::from_draft(LocationId::new(), draft());
        let keep = location.push_review(review("Simon", 4)).id;
        let drop = location.push_review(review("Charlie", 2)).id;

        assert!(location.remove_review(drop).is_some());
        assert!(location.review(drop).is_none());
        assert!(location.review(keep).is_some());
        assert!(location.remove_review(drop).is_none());
    }
}
