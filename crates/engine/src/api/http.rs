//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;

use super::error::{ApiError, Endpoint};
use super::extract::FormOrJson;
use super::response::send_json;
use crate::app::App;
use crate::use_cases::{DistanceQuery, LocationForm, ReviewForm};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/locations",
            get(list_by_distance).post(create_location),
        )
        .route(
            "/api/locations/{locationid}",
            get(read_location)
                .put(update_location)
                .delete(delete_location),
        )
        .route("/api/locations/{locationid}/reviews", post(create_review))
        .route(
            "/api/locations/{locationid}/reviews/{reviewid}",
            get(read_review).put(update_review).delete(delete_review),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Locations
// =============================================================================

async fn list_by_distance(
    State(app): State<Arc<App>>,
    Query(query): Query<DistanceQuery>,
) -> Result<Response, ApiError> {
    let locations = app
        .use_cases
        .locations
        .list_by_distance(&query)
        .await
        .map_err(Endpoint::ListByDistance.error(app.error_mode))?;
    Ok(send_json(StatusCode::OK, locations))
}

async fn read_location(
    State(app): State<Arc<App>>,
    Path(location_id): Path<String>,
) -> Result<Response, ApiError> {
    let location = app
        .use_cases
        .locations
        .read_one(&location_id)
        .await
        .map_err(Endpoint::LocationRead.error(app.error_mode))?;
    Ok(send_json(StatusCode::OK, location))
}

async fn create_location(
    State(app): State<Arc<App>>,
    FormOrJson(form): FormOrJson<LocationForm>,
) -> Result<Response, ApiError> {
    let location = app
        .use_cases
        .locations
        .create(&form)
        .await
        .map_err(Endpoint::LocationCreate.error(app.error_mode))?;
    Ok(send_json(StatusCode::CREATED, location))
}

async fn update_location(
    State(app): State<Arc<App>>,
    Path(location_id): Path<String>,
    FormOrJson(form): FormOrJson<LocationForm>,
) -> Result<Response, ApiError> {
    let location = app
        .use_cases
        .locations
        .update(&location_id, &form)
        .await
        .map_err(Endpoint::LocationUpdate.error(app.error_mode))?;
    Ok(send_json(StatusCode::OK, location))
}

async fn delete_location(
    State(app): State<Arc<App>>,
    Path(location_id): Path<String>,
) -> Response {
    app.use_cases.locations.delete(&location_id);
    send_json(StatusCode::OK, json!({ "status": "success" }))
}

// =============================================================================
// Reviews
// =============================================================================

async fn create_review(
    State(app): State<Arc<App>>,
    Path(location_id): Path<String>,
    FormOrJson(form): FormOrJson<ReviewForm>,
) -> Result<Response, ApiError> {
    let review = app
        .use_cases
        .reviews
        .create(&location_id, &form)
        .await
        .map_err(Endpoint::ReviewCreate.error(app.error_mode))?;
    Ok(send_json(StatusCode::CREATED, review))
}

async fn read_review(
    State(app): State<Arc<App>>,
    Path((location_id, review_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let found = app
        .use_cases
        .reviews
        .read_one(&location_id, &review_id)
        .await
        .map_err(Endpoint::ReviewRead.error(app.error_mode))?;
    Ok(send_json(StatusCode::OK, found))
}

async fn update_review(
    State(app): State<Arc<App>>,
    Path((location_id, review_id)): Path<(String, String)>,
    FormOrJson(form): FormOrJson<ReviewForm>,
) -> Result<Response, ApiError> {
    let review = app
        .use_cases
        .reviews
        .update(&location_id, &review_id, &form)
        .await
        .map_err(Endpoint::ReviewUpdate.error(app.error_mode))?;
    Ok(send_json(StatusCode::OK, review))
}

async fn delete_review(
    State(app): State<Arc<App>>,
    Path((location_id, review_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    app.use_cases
        .reviews
        .delete(&location_id, &review_id)
        .await
        .map_err(Endpoint::ReviewDelete.error(app.error_mode))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
