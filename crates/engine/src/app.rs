//! Application state and composition.

use std::sync::Arc;

use crate::config::ErrorMode;
use crate::infrastructure::ports::{ClockPort, LocationRepo};
use crate::use_cases::{LocationUseCases, RatingRecalculator, ReviewUseCases};

/// Main application state.
///
/// Holds the repository port and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub ratings: RatingRecalculator,
    pub error_mode: ErrorMode,
}

/// Container for repository ports.
pub struct Repositories {
    pub location: Arc<dyn LocationRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub locations: LocationUseCases,
    pub reviews: ReviewUseCases,
}

impl App {
    pub fn new(
        location_repo: Arc<dyn LocationRepo>,
        clock: Arc<dyn ClockPort>,
        error_mode: ErrorMode,
    ) -> Self {
        let ratings = RatingRecalculator::new(location_repo.clone());

        let use_cases = UseCases {
            locations: LocationUseCases::new(location_repo.clone()),
            reviews: ReviewUseCases::new(location_repo.clone(), clock, ratings.clone()),
        };

        Self {
            repositories: Repositories {
                location: location_repo,
            },
            use_cases,
            ratings,
            error_mode,
        }
    }
}
