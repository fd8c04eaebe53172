//! Stored document shapes and their mapping to domain entities.
//!
//! Every field defaults so that projected fetches deserialize.

use chrono::{DateTime, Utc};
use loc8r_domain::{Coords, Location, LocationId, OpeningTime, Review, ReviewId};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub coords: [f64; 2],
    #[serde(default)]
    pub opening_times: Vec<OpeningTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default)]
    pub reviews: Vec<ReviewDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_on: Option<bson::DateTime>,
}

impl From<&Review> for ReviewDocument {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            author: review.author.clone(),
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_on: Some(bson::DateTime::from_millis(review.created_on.timestamp_millis())),
        }
    }
}

impl TryFrom<ReviewDocument> for Review {
    type Error = RepoError;

    fn try_from(doc: ReviewDocument) -> Result<Self, Self::Error> {
        let id: ReviewId = doc.id.parse().map_err(RepoError::serialization)?;
        let created_on = doc
            .created_on
            .and_then(|dt| DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()))
            .unwrap_or_default();

        Ok(Review {
            id,
            author: doc.author,
            rating: doc.rating,
            review_text: doc.review_text,
            created_on,
        })
    }
}

impl From<&Location> for LocationDocument {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            address: location.address.clone(),
            facilities: location.facilities.clone(),
            coords: location.coords.into(),
            opening_times: location.opening_times.to_vec(),
            rating: location.rating,
            reviews: location.reviews.iter().map(ReviewDocument::from).collect(),
        }
    }
}

impl TryFrom<LocationDocument> for Location {
    type Error = RepoError;

    fn try_from(doc: LocationDocument) -> Result<Self, Self::Error> {
        let id: LocationId = doc.id.parse().map_err(RepoError::serialization)?;

        let mut times = doc.opening_times.into_iter();
        let opening_times = [
            times.next().unwrap_or_default(),
            times.next().unwrap_or_default(),
        ];

        let reviews = doc
            .reviews
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Location {
            id,
            name: doc.name,
            address: doc.address,
            facilities: doc.facilities,
            coords: Coords::from(doc.coords),
            opening_times,
            rating: doc.rating,
            reviews,
        })
    }
}
