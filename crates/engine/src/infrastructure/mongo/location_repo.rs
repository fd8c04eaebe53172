//! MongoDB location repository implementation.
//!
//! Locations are single documents with reviews embedded as an array. Ids are
//! stored as strings. Proximity search uses `$geoNear` with a legacy
//! coordinate pair against the `2dsphere` index, so distances are radians.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use loc8r_domain::{Coords, Location, LocationDraft, LocationId, Review};
use mongodb::{
    bson::{self, doc, Document},
    error::ErrorKind,
    Collection, Database,
};

use super::documents::{LocationDocument, ReviewDocument};
use super::LOCATIONS_COLLECTION;
use crate::infrastructure::ports::{GeoMatch, LocationFields, LocationRepo, RepoError};

/// Field the aggregation writes the computed distance into.
const DISTANCE_FIELD: &str = "dist.calculated";

/// Repository for Location documents.
pub struct MongoLocationRepo {
    collection: Collection<LocationDocument>,
}

impl MongoLocationRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(LOCATIONS_COLLECTION),
        }
    }

    async fn set_fields(
        &self,
        operation: &'static str,
        id: LocationId,
        fields: Document,
    ) -> Result<(), RepoError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id.to_string() }, doc! { "$set": fields })
            .await
            .map_err(|e| write_error(operation, e))?;

        if result.matched_count == 0 {
            return Err(RepoError::not_found("Location", id));
        }
        Ok(())
    }
}

fn projection(fields: LocationFields) -> Document {
    match fields {
        LocationFields::All => Document::new(),
        LocationFields::WithoutReviews => doc! { "reviews": 0, "rating": 0 },
        LocationFields::Reviews => doc! { "reviews": 1 },
        LocationFields::NameAndReviews => doc! { "name": 1, "reviews": 1 },
        LocationFields::RatingAndReviews => doc! { "rating": 1, "reviews": 1 },
    }
}

/// Rejected writes (validation, geo keys) are constraint violations; anything
/// else is a database failure.
fn write_error(operation: &'static str, e: mongodb::error::Error) -> RepoError {
    match e.kind.as_ref() {
        ErrorKind::Write(_) => RepoError::constraint(e),
        _ => RepoError::database(operation, e),
    }
}

#[async_trait]
impl LocationRepo for MongoLocationRepo {
    async fn find_near(
        &self,
        near: Coords,
        max_distance: f64,
        limit: u32,
    ) -> Result<Vec<GeoMatch>, RepoError> {
        let pipeline = vec![
            doc! {
                "$geoNear": {
                    "near": [near.lng, near.lat],
                    "spherical": true,
                    "maxDistance": max_distance,
                    "distanceField": DISTANCE_FIELD,
                    "key": "coords",
                }
            },
            doc! { "$limit": i64::from(limit) },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| RepoError::database("geo_near", e))?;

        let mut matches = Vec::new();
        while let Some(raw) = cursor
            .try_next()
            .await
            .map_err(|e| RepoError::database("geo_near", e))?
        {
            let distance = raw
                .get_document("dist")
                .and_then(|dist| dist.get_f64("calculated"))
                .map_err(RepoError::serialization)?;
            let document: LocationDocument =
                bson::from_document(raw).map_err(RepoError::serialization)?;

            matches.push(GeoMatch {
                distance,
                location: Location::try_from(document)?,
            });
        }

        Ok(matches)
    }

    async fn get(
        &self,
        id: LocationId,
        fields: LocationFields,
    ) -> Result<Option<Location>, RepoError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .projection(projection(fields))
            .await
            .map_err(|e| RepoError::database("find_one", e))?;

        document.map(Location::try_from).transpose()
    }

    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError> {
        let location = Location::from_draft(LocationId::new(), draft);

        self.collection
            .insert_one(LocationDocument::from(&location))
            .await
            .map_err(|e| write_error("insert_one", e))?;

        Ok(location)
    }

    async fn save_details(&self, location: &Location) -> Result<(), RepoError> {
        let opening_times =
            bson::to_bson(&location.opening_times).map_err(RepoError::serialization)?;
        let fields = doc! {
            "name": location.name.clone(),
            "address": location.address.clone(),
            "facilities": location.facilities.clone(),
            "coords": [location.coords.lng, location.coords.lat],
            "openingTimes": opening_times,
        };

        self.set_fields("save_details", location.id, fields).await
    }

    async fn save_reviews(&self, id: LocationId, reviews: &[Review]) -> Result<(), RepoError> {
        let documents: Vec<ReviewDocument> = reviews.iter().map(ReviewDocument::from).collect();
        let reviews = bson::to_bson(&documents).map_err(RepoError::serialization)?;

        self.set_fields("save_reviews", id, doc! { "reviews": reviews })
            .await
    }

    async fn save_rating(&self, id: LocationId, rating: i32) -> Result<(), RepoError> {
        self.set_fields("save_rating", id, doc! { "rating": rating })
            .await
    }
}
