//! Review use cases: create, read, update and delete reviews embedded in a
//! location.
//!
//! Every successful mutation schedules an average-rating recomputation.

use std::sync::Arc;

use loc8r_domain::{common::cast_integer, DomainError, Location, LocationId, Review, ReviewId};
use serde::{Deserialize, Serialize};

use super::form::scalar_text;
use super::rating::RatingRecalculator;
use super::{
    lookup_location_id, required, RequestError, LOCATION_NOT_FOUND,
    MISSING_LOCATION_ID_FOR_REVIEW, MISSING_REVIEW_PARAMS, NO_REVIEWS_FOUND, NO_REVIEW_TO_DELETE,
    NO_REVIEW_TO_UPDATE, REVIEW_NOT_FOUND,
};
use crate::infrastructure::ports::{ClockPort, LocationFields, LocationRepo, RepoError};

/// Flat body of review create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default, deserialize_with = "scalar_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub rating: Option<String>,
    #[serde(default, rename = "reviewText", deserialize_with = "scalar_text")]
    pub review_text: Option<String>,
}

/// A review form cast to stored types.
struct ReviewFields {
    author: String,
    rating: i32,
    review_text: String,
}

impl ReviewForm {
    fn fields(&self) -> Result<ReviewFields, DomainError> {
        let present = |value: &Option<String>, field: &str| {
            value
                .clone()
                .ok_or_else(|| DomainError::validation(format!("{field} is required")))
        };

        let rating = present(&self.rating, "rating")?;
        Ok(ReviewFields {
            author: present(&self.author, "author")?,
            rating: cast_integer("rating", &rating)?,
            review_text: present(&self.review_text, "reviewText")?,
        })
    }
}

/// Name and id of the location a review was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRef {
    pub name: String,
    pub id: LocationId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewWithLocation {
    pub location: LocationRef,
    pub review: Review,
}

/// Review use cases.
pub struct ReviewUseCases {
    location_repo: Arc<dyn LocationRepo>,
    clock: Arc<dyn ClockPort>,
    ratings: RatingRecalculator,
}

impl ReviewUseCases {
    pub fn new(
        location_repo: Arc<dyn LocationRepo>,
        clock: Arc<dyn ClockPort>,
        ratings: RatingRecalculator,
    ) -> Self {
        Self {
            location_repo,
            clock,
            ratings,
        }
    }

    /// Append a review and return it as stored (the last element).
    ///
    /// Unlike the other review operations, an id the store cannot cast is a
    /// fetch failure here.
    pub async fn create(&self, location_id: &str, form: &ReviewForm) -> Result<Review, RequestError> {
        let raw = required(location_id)
            .ok_or(RequestError::MissingParams(MISSING_LOCATION_ID_FOR_REVIEW))?;
        let id: LocationId = raw
            .parse()
            .map_err(|_| RequestError::Fetch(RepoError::invalid_id(raw)))?;

        let mut location = self
            .location_repo
            .get(id, LocationFields::Reviews)
            .await
            .map_err(RequestError::Fetch)?
            .ok_or(RequestError::NotFound(LOCATION_NOT_FOUND))?;

        let fields = form.fields().map_err(RequestError::invalid_field)?;
        let review = location
            .push_review(Review::new(
                fields.author,
                fields.rating,
                fields.review_text,
                self.clock.now(),
            ))
            .clone();

        self.location_repo
            .save_reviews(id, &location.reviews)
            .await
            .map_err(RequestError::Save)?;

        tracing::info!(location_id = %id, review_id = %review.id, "Review created");
        self.ratings.schedule(id);
        Ok(review)
    }

    pub async fn read_one(
        &self,
        location_id: &str,
        review_id: &str,
    ) -> Result<ReviewWithLocation, RequestError> {
        let (location_id, review_id) = review_params(location_id, review_id)?;
        let location = self
            .load(location_id, LocationFields::NameAndReviews, NO_REVIEWS_FOUND)
            .await?;

        let review = find_review(&location, review_id)?.clone();
        Ok(ReviewWithLocation {
            location: LocationRef {
                name: location.name,
                id: location_id,
            },
            review,
        })
    }

    /// Overwrite author, rating and text of one review.
    pub async fn update(
        &self,
        location_id: &str,
        review_id: &str,
        form: &ReviewForm,
    ) -> Result<Review, RequestError> {
        let (location_id, review_id) = review_params(location_id, review_id)?;
        let mut location = self
            .load(location_id, LocationFields::Reviews, NO_REVIEW_TO_UPDATE)
            .await?;

        let review_id = find_review(&location, review_id)?.id;
        let fields = form.fields().map_err(RequestError::invalid_field)?;
        let review = location
            .review_mut(review_id)
            .ok_or(RequestError::NotFound(REVIEW_NOT_FOUND))?;
        review.overwrite(fields.author, fields.rating, fields.review_text);
        let review = review.clone();

        self.location_repo
            .save_reviews(location_id, &location.reviews)
            .await
            .map_err(RequestError::Save)?;

        self.ratings.schedule(location_id);
        Ok(review)
    }

    pub async fn delete(&self, location_id: &str, review_id: &str) -> Result<(), RequestError> {
        let (location_id, review_id) = review_params(location_id, review_id)?;
        let mut location = self
            .load(location_id, LocationFields::Reviews, NO_REVIEW_TO_DELETE)
            .await?;

        let review_id = find_review(&location, review_id)?.id;
        location.remove_review(review_id);

        self.location_repo
            .save_reviews(location_id, &location.reviews)
            .await
            .map_err(RequestError::Save)?;

        tracing::info!(location_id = %location_id, review_id = %review_id, "Review deleted");
        self.ratings.schedule(location_id);
        Ok(())
    }

    /// Fetch a location that must exist and hold at least one review.
    async fn load(
        &self,
        id: LocationId,
        fields: LocationFields,
        when_empty: &'static str,
    ) -> Result<Location, RequestError> {
        let location = self
            .location_repo
            .get(id, fields)
            .await
            .map_err(RequestError::Fetch)?
            .ok_or(RequestError::NotFound(LOCATION_NOT_FOUND))?;

        if location.reviews.is_empty() {
            return Err(RequestError::NotFound(when_empty));
        }
        Ok(location)
    }
}

/// Both ids are required. The review id is only parsed; one that cannot name
/// a review simply matches nothing.
fn review_params(
    location_id: &str,
    review_id: &str,
) -> Result<(LocationId, Option<ReviewId>), RequestError> {
    let (Some(location_id), Some(review_id)) = (required(location_id), required(review_id)) else {
        return Err(RequestError::MissingParams(MISSING_REVIEW_PARAMS));
    };
    Ok((lookup_location_id(location_id)?, review_id.parse().ok()))
}

fn find_review(location: &Location, id: Option<ReviewId>) -> Result<&Review, RequestError> {
    id.and_then(|id| location.review(id))
        .ok_or(RequestError::NotFound(REVIEW_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockLocationRepo};
    use chrono::{DateTime, TimeZone, Utc};
    use loc8r_domain::{Coords, LocationDraft, OpeningTime};
    use mockall::predicate::*;

    fn created_on() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    fn location(id: LocationId, reviews: Vec<Review>) -> Location {
        let mut location = Location::from_draft(
            id,
            LocationDraft {
                name: "Starcups".into(),
                address: String::new(),
                facilities: Vec::new(),
                coords: Coords::new(-0.96, 51.45),
                opening_times: [OpeningTime::default(), OpeningTime::default()],
            },
        );
        location.reviews = reviews;
        location
    }

    fn form(author: &str, rating: &str, text: &str) -> ReviewForm {
        ReviewForm {
            author: Some(author.into()),
            rating: Some(rating.into()),
            review_text: Some(text.into()),
        }
    }

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(created_on);
        clock
    }

    fn use_cases(repo: MockLocationRepo) -> ReviewUseCases {
        let repo: Arc<dyn LocationRepo> = Arc::new(repo);
        ReviewUseCases::new(repo.clone(), Arc::new(clock()), RatingRecalculator::new(repo))
    }

    #[tokio::test]
    async fn create_appends_and_schedules_rating() {
        let id = LocationId::new();
        let existing = Review::new("Simon", 5, "Great", created_on());
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .with(eq(id), eq(LocationFields::Reviews))
            .returning(move |id, _| Ok(Some(location(id, vec![existing.clone()]))));
        repo.expect_save_reviews()
            .withf(|_, reviews| reviews.len() == 2 && reviews[1].author == "Charlie")
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_get()
            .with(eq(id), eq(LocationFields::RatingAndReviews))
            .returning(|_, _| Ok(None));
        let use_cases = use_cases(repo);

        let review = use_cases
            .create(&id.to_string(), &form("Charlie", "2", "Slow wifi"))
            .await
            .unwrap();
        use_cases.ratings.wait_idle().await;

        assert_eq!(review.author, "Charlie");
        assert_eq!(review.rating, 2);
        assert_eq!(review.created_on, created_on());
    }

    #[tokio::test]
    async fn create_maps_id_and_lookup_failures() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get().returning(|_, _| Ok(None));
        repo.expect_save_reviews().never();
        let use_cases = use_cases(repo);
        let form = form("Charlie", "2", "Slow wifi");

        assert_eq!(
            use_cases.create("", &form).await,
            Err(RequestError::MissingParams(MISSING_LOCATION_ID_FOR_REVIEW))
        );
        assert_eq!(
            use_cases.create("not-an-id", &form).await,
            Err(RequestError::Fetch(RepoError::invalid_id("not-an-id")))
        );
        assert_eq!(
            use_cases.create(&LocationId::new().to_string(), &form).await,
            Err(RequestError::NotFound(LOCATION_NOT_FOUND))
        );
    }

    #[tokio::test]
    async fn create_with_bad_rating_is_a_save_error() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .returning(|id, _| Ok(Some(location(id, Vec::new()))));
        repo.expect_save_reviews().never();
        let use_cases = use_cases(repo);

        let err = use_cases
            .create(&LocationId::new().to_string(), &form("Charlie", "lots", "Slow"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Save(RepoError::ConstraintViolation(_))));

        let missing = ReviewForm {
            author: None,
            ..form("Charlie", "3", "Fine")
        };
        let err = use_cases
            .create(&LocationId::new().to_string(), &missing)
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Save(_)));
    }

    #[tokio::test]
    async fn read_one_returns_review_with_location_ref() {
        let id = LocationId::new();
        let review = Review::new("Simon", 5, "Great", created_on());
        let review_id = review.id;
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .with(eq(id), eq(LocationFields::NameAndReviews))
            .returning(move |id, _| Ok(Some(location(id, vec![review.clone()]))));
        let use_cases = use_cases(repo);

        let found = use_cases
            .read_one(&id.to_string(), &review_id.to_string())
            .await
            .unwrap();
        assert_eq!(found.location.name, "Starcups");
        assert_eq!(found.location.id, id);
        assert_eq!(found.review.id, review_id);

        assert_eq!(
            use_cases.read_one(&id.to_string(), "nope").await,
            Err(RequestError::NotFound(REVIEW_NOT_FOUND))
        );
        assert_eq!(
            use_cases.read_one(&id.to_string(), &ReviewId::new().to_string()).await,
            Err(RequestError::NotFound(REVIEW_NOT_FOUND))
        );
        assert_eq!(
            use_cases.read_one(&id.to_string(), "").await,
            Err(RequestError::MissingParams(MISSING_REVIEW_PARAMS))
        );
    }

    #[tokio::test]
    async fn empty_review_lists_have_operation_specific_messages() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .returning(|id, _| Ok(Some(location(id, Vec::new()))));
        repo.expect_save_reviews().never();
        let use_cases = use_cases(repo);
        let id = LocationId::new().to_string();
        let review_id = ReviewId::new().to_string();
        let form = form("Charlie", "2", "Slow wifi");

        assert_eq!(
            use_cases.read_one(&id, &review_id).await,
            Err(RequestError::NotFound(NO_REVIEWS_FOUND))
        );
        assert_eq!(
            use_cases.update(&id, &review_id, &form).await,
            Err(RequestError::NotFound(NO_REVIEW_TO_UPDATE))
        );
        assert_eq!(
            use_cases.delete(&id, &review_id).await,
            Err(RequestError::NotFound(NO_REVIEW_TO_DELETE))
        );
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_identity() {
        let id = LocationId::new();
        let review = Review::new("Simon", 5, "Great", created_on());
        let review_id = review.id;
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .with(eq(id), eq(LocationFields::Reviews))
            .returning(move |id, _| Ok(Some(location(id, vec![review.clone()]))));
        repo.expect_save_reviews()
            .with(eq(id), always())
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_get()
            .with(eq(id), eq(LocationFields::RatingAndReviews))
            .returning(|_, _| Ok(None));
        let use_cases = use_cases(repo);

        let updated = use_cases
            .update(&id.to_string(), &review_id.to_string(), &form("Simone", "3", "Okay"))
            .await
            .unwrap();
        use_cases.ratings.wait_idle().await;

        assert_eq!(updated.id, review_id);
        assert_eq!(updated.author, "Simone");
        assert_eq!(updated.rating, 3);
        assert_eq!(updated.review_text, "Okay");
        assert_eq!(updated.created_on, created_on());
    }

    #[tokio::test]
    async fn delete_removes_review_and_maps_save_errors() {
        let id = LocationId::new();
        let keep = Review::new("Simon", 5, "Great", created_on());
        let gone = Review::new("Charlie", 1, "Bad", created_on());
        let gone_id = gone.id;
        let keep_id = keep.id;
        let mut repo = MockLocationRepo::new();
        repo.expect_get()
            .with(eq(id), eq(LocationFields::Reviews))
            .returning(move |id, _| Ok(Some(location(id, vec![keep.clone(), gone.clone()]))));
        repo.expect_save_reviews()
            .withf(move |_, reviews| reviews.len() == 1 && reviews[0].id == keep_id)
            .times(1)
            .returning(|_, _| Err(RepoError::database("save_reviews", "write conflict")));
        let use_cases = use_cases(repo);

        let err = use_cases
            .delete(&id.to_string(), &gone_id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Save(RepoError::Database { .. })));
        assert_eq!(use_cases.ratings.pending(), 0);
    }
}
