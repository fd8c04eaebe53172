//! Review entity - a rating left on exactly one location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ReviewId;

/// A review embedded in a location's review list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub author: String,
    pub rating: i32,
    pub review_text: String,
    /// When the review was first appended. Updates keep it.
    pub created_on: DateTime<Utc>,
}

impl Review {
    /// Create a review with a fresh sub-identifier.
    pub fn new(
        author: impl Into<String>,
        rating: i32,
        review_text: impl Into<String>,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            author: author.into(),
            rating,
            review_text: review_text.into(),
            created_on,
        }
    }

    /// Replace author, rating and text. Identity and creation time are kept.
    pub fn overwrite(&mut self, author: String, rating: i32, review_text: String) {
        self.author = author;
        self.rating = rating;
        self.review_text = review_text;
    }
}
