//! In-memory document store for development and testing.
//!
//! Follows the same contract as the MongoDB adapter: spherical distances in
//! radians, projections that blank excluded fields, partial writes, and a
//! geospatial check on coordinates. Nothing is persisted.

use async_trait::async_trait;
use loc8r_domain::{Coords, Location, LocationDraft, LocationId, OpeningTime, Review};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{GeoMatch, LocationFields, LocationRepo, RepoError};

/// In-memory location collection, kept in insertion order.
#[derive(Default)]
pub struct InMemoryLocationRepo {
    locations: RwLock<Vec<Location>>,
}

impl InMemoryLocationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored locations.
    pub async fn len(&self) -> usize {
        self.locations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locations.read().await.is_empty()
    }
}

/// Central angle between two points, in radians (haversine).
fn central_angle(a: Coords, b: Coords) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

fn check_coords(coords: Coords) -> Result<(), RepoError> {
    if coords.is_valid() {
        Ok(())
    } else {
        Err(RepoError::constraint(format!(
            "Can't extract geo keys: coords [{}, {}] out of bounds",
            coords.lng, coords.lat
        )))
    }
}

fn project(location: &Location, fields: LocationFields) -> Location {
    let mut projected = location.clone();
    if !fields.includes_reviews() {
        projected.reviews.clear();
    }
    if !fields.includes_rating() {
        projected.rating = None;
    }
    if !fields.includes_name() {
        projected.name.clear();
    }
    if !fields.includes_details() {
        projected.address.clear();
        projected.facilities.clear();
        projected.coords = Coords::new(0.0, 0.0);
        projected.opening_times = [OpeningTime::default(), OpeningTime::default()];
    }
    projected
}

#[async_trait]
impl LocationRepo for InMemoryLocationRepo {
    async fn find_near(
        &self,
        near: Coords,
        max_distance: f64,
        limit: u32,
    ) -> Result<Vec<GeoMatch>, RepoError> {
        check_coords(near)?;

        let locations = self.locations.read().await;
        let mut matches: Vec<GeoMatch> = locations
            .iter()
            .map(|location| GeoMatch {
                distance: central_angle(near, location.coords),
                location: location.clone(),
            })
            .filter(|m| m.distance <= max_distance)
            .collect();

        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn get(
        &self,
        id: LocationId,
        fields: LocationFields,
    ) -> Result<Option<Location>, RepoError> {
        let locations = self.locations.read().await;
        Ok(locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| project(l, fields)))
    }

    async fn create(&self, draft: LocationDraft) -> Result<Location, RepoError> {
        check_coords(draft.coords)?;

        let location = Location::from_draft(LocationId::new(), draft);
        self.locations.write().await.push(location.clone());
        Ok(location)
    }

    async fn save_details(&self, location: &Location) -> Result<(), RepoError> {
        check_coords(location.coords)?;

        let mut locations = self.locations.write().await;
        let stored = locations
            .iter_mut()
            .find(|l| l.id == location.id)
            .ok_or_else(|| RepoError::not_found("Location", location.id))?;

        stored.name = location.name.clone();
        stored.address = location.address.clone();
        stored.facilities = location.facilities.clone();
        stored.coords = location.coords;
        stored.opening_times = location.opening_times.clone();
        Ok(())
    }

    async fn save_reviews(&self, id: LocationId, reviews: &[Review]) -> Result<(), RepoError> {
        let mut locations = self.locations.write().await;
        let stored = locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| RepoError::not_found("Location", id))?;

        stored.reviews = reviews.to_vec();
        Ok(())
    }

    async fn save_rating(&self, id: LocationId, rating: i32) -> Result<(), RepoError> {
        let mut locations = self.locations.write().await;
        let stored = locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| RepoError::not_found("Location", id))?;

        stored.rating = Some(rating);
        Ok(())
    }
}
