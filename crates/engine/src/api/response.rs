//! Response writer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Respond with `status` and `body` serialized as JSON.
pub fn send_json<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}
