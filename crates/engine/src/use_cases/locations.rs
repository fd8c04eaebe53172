//! Location use cases: proximity search, read, create, update and the delete stub.

use std::sync::Arc;

use loc8r_domain::{
    common::{parse_float, split_facilities},
    radians_to_km, Coords, DomainError, Location, LocationDraft, LocationId, OpeningTime,
};
use serde::{Deserialize, Serialize};

use super::form::scalar_text;
use super::{
    lookup_location_id, required, RequestError, LOCATION_NOT_FOUND, MISSING_DISTANCE_PARAMS,
    MISSING_LOCATION_ID, MISSING_LOCATION_ID_FOR_UPDATE,
};
use crate::infrastructure::ports::{GeoMatch, LocationFields, LocationRepo};

/// Maximum number of results from a proximity search.
pub const NEAREST_LIMIT: u32 = 10;

/// Query string of the proximity search. Values stay raw until parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceQuery {
    pub lng: Option<String>,
    pub lat: Option<String>,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<String>,
}

/// Flat body of location create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationForm {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub address: Option<String>,
    /// Comma-separated.
    #[serde(default, deserialize_with = "scalar_text")]
    pub facilities: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub lng: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub lat: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub days1: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub opening1: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub closing1: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub closed1: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub days2: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub opening2: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub closing2: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub closed2: Option<String>,
}

impl LocationForm {
    /// Cast the form into a draft. Coordinates that do not parse become NaN
    /// and are rejected by the store.
    pub fn to_draft(&self) -> Result<LocationDraft, DomainError> {
        let facilities = split_facilities(self.facilities.as_deref())?;
        let coords = Coords::from_fields(self.lng.as_deref(), self.lat.as_deref());
        let opening_times = [
            OpeningTime::from_fields(
                self.days1.as_deref(),
                self.opening1.as_deref(),
                self.closing1.as_deref(),
                self.closed1.as_deref(),
                "closed1",
            )?,
            OpeningTime::from_fields(
                self.days2.as_deref(),
                self.opening2.as_deref(),
                self.closing2.as_deref(),
                self.closed2.as_deref(),
                "closed2",
            )?,
        ];

        Ok(LocationDraft {
            name: self.name.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            facilities,
            coords,
            opening_times,
        })
    }
}

/// One proximity search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSummary {
    /// Kilometres from the search point.
    pub distance: f64,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    pub facilities: Vec<String>,
    #[serde(rename = "_id")]
    pub id: LocationId,
}

impl From<GeoMatch> for LocationSummary {
    fn from(m: GeoMatch) -> Self {
        Self {
            distance: radians_to_km(m.distance),
            name: m.location.name,
            address: m.location.address,
            rating: m.location.rating,
            facilities: m.location.facilities,
            id: m.location.id,
        }
    }
}

/// A query value that parses to a non-zero number.
fn truthy_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_float).filter(|v| *v != 0.0)
}

/// Location use cases.
pub struct LocationUseCases {
    location_repo: Arc<dyn LocationRepo>,
}

impl LocationUseCases {
    pub fn new(location_repo: Arc<dyn LocationRepo>) -> Self {
        Self { location_repo }
    }

    /// Up to [`NEAREST_LIMIT`] locations within `maxDistance` radians,
    /// nearest first, with distances in kilometres.
    pub async fn list_by_distance(
        &self,
        query: &DistanceQuery,
    ) -> Result<Vec<LocationSummary>, RequestError> {
        let (Some(lng), Some(lat), Some(max_distance)) = (
            truthy_number(query.lng.as_deref()),
            truthy_number(query.lat.as_deref()),
            truthy_number(query.max_distance.as_deref()),
        ) else {
            tracing::debug!(?query, "Proximity search missing params");
            return Err(RequestError::MissingParams(MISSING_DISTANCE_PARAMS));
        };

        let matches = self
            .location_repo
            .find_near(Coords::new(lng, lat), max_distance, NEAREST_LIMIT)
            .await
            .map_err(RequestError::Fetch)?;

        Ok(matches.into_iter().map(LocationSummary::from).collect())
    }

    pub async fn read_one(&self, location_id: &str) -> Result<Location, RequestError> {
        let raw = required(location_id).ok_or(RequestError::MissingParams(MISSING_LOCATION_ID))?;
        let id = lookup_location_id(raw)?;

        self.location_repo
            .get(id, LocationFields::All)
            .await
            .map_err(RequestError::Fetch)?
            .ok_or(RequestError::NotFound(LOCATION_NOT_FOUND))
    }

    pub async fn create(&self, form: &LocationForm) -> Result<Location, RequestError> {
        let draft = form.to_draft().map_err(RequestError::invalid_field)?;
        let location = self
            .location_repo
            .create(draft)
            .await
            .map_err(RequestError::Save)?;

        tracing::info!(location_id = %location.id, name = %location.name, "Location created");
        Ok(location)
    }

    /// Overwrite every editable field. Reviews and rating are neither loaded
    /// nor written, and are absent from the returned location.
    pub async fn update(
        &self,
        location_id: &str,
        form: &LocationForm,
    ) -> Result<Location, RequestError> {
        let raw = required(location_id)
            .ok_or(RequestError::MissingParams(MISSING_LOCATION_ID_FOR_UPDATE))?;
        let id = lookup_location_id(raw)?;

        let mut location = self
            .location_repo
            .get(id, LocationFields::WithoutReviews)
            .await
            .map_err(RequestError::Fetch)?
            .ok_or(RequestError::NotFound(LOCATION_NOT_FOUND))?;

        let draft = form.to_draft().map_err(RequestError::invalid_field)?;
        location.apply_draft(draft);
        self.location_repo
            .save_details(&location)
            .await
            .map_err(RequestError::Save)?;

        Ok(location)
    }

    /// Acknowledges a delete without removing anything.
    pub fn delete(&self, location_id: &str) {
        tracing::info!(location_id, "Location delete requested; nothing was deleted");
    }
}
