//! Average-rating recomputation.
//!
//! Runs after every successful review mutation. Scheduled recomputations are
//! detached from the request and tracked so shutdown can drain them.

use std::sync::Arc;

use loc8r_domain::{average_rating, LocationId};
use tokio_util::task::TaskTracker;

use crate::infrastructure::ports::{LocationFields, LocationRepo, RepoError};

/// Recomputes a location's rating from its persisted reviews.
#[derive(Clone)]
pub struct RatingRecalculator {
    location_repo: Arc<dyn LocationRepo>,
    tracker: TaskTracker,
}

impl RatingRecalculator {
    pub fn new(location_repo: Arc<dyn LocationRepo>) -> Self {
        Self {
            location_repo,
            tracker: TaskTracker::new(),
        }
    }

    /// Recompute in the background. Failures are logged, never returned.
    pub fn schedule(&self, location_id: LocationId) {
        let recalculator = self.clone();
        self.tracker.spawn(async move {
            if let Err(e) = recalculator.recompute(location_id).await {
                tracing::warn!(
                    location_id = %location_id,
                    error = %e,
                    "Average rating not updated"
                );
            }
        });
    }

    /// Recompute now and return the rating written, if any.
    ///
    /// A missing location or one without reviews leaves the stored rating
    /// untouched and yields `None`.
    pub async fn recompute(&self, location_id: LocationId) -> Result<Option<i32>, RepoError> {
        let Some(location) = self
            .location_repo
            .get(location_id, LocationFields::RatingAndReviews)
            .await?
        else {
            tracing::debug!(location_id = %location_id, "Rating skipped: location not found");
            return Ok(None);
        };

        let Some(rating) = average_rating(&location.reviews) else {
            return Ok(None);
        };

        self.location_repo.save_rating(location_id, rating).await?;
        tracing::info!(location_id = %location_id, rating, "Average rating updated");
        Ok(Some(rating))
    }

    /// Number of scheduled recomputations still running.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every scheduled recomputation has finished. New ones may be
    /// scheduled afterwards.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Close the tracker and wait for outstanding recomputations.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
