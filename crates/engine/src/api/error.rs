//! HTTP error mapping.
//!
//! In compat mode a store failure's status depends on the endpoint and on
//! whether it happened while loading or while saving.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};

use super::response::send_json;
use crate::config::ErrorMode;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::RequestError;

/// Routes that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListByDistance,
    LocationRead,
    LocationCreate,
    LocationUpdate,
    ReviewCreate,
    ReviewRead,
    ReviewUpdate,
    ReviewDelete,
}

impl Endpoint {
    fn fetch_status(self) -> StatusCode {
        match self {
            Self::ListByDistance | Self::LocationRead => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn save_status(self) -> StatusCode {
        match self {
            Self::LocationUpdate | Self::ReviewUpdate | Self::ReviewDelete => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Error adapter for `map_err`.
    pub fn error(self, mode: ErrorMode) -> impl Fn(RequestError) -> ApiError {
        move |error| ApiError::Request {
            endpoint: self,
            mode,
            error,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Request {
        endpoint: Endpoint,
        mode: ErrorMode,
        error: RequestError,
    },
    /// The request body could not be read.
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Request {
                endpoint,
                mode: ErrorMode::Compat,
                error,
            } => match error {
                RequestError::MissingParams(_) | RequestError::NotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                RequestError::Fetch(_) => endpoint.fetch_status(),
                RequestError::Save(_) => endpoint.save_status(),
            },
            Self::Request {
                mode: ErrorMode::Normalized,
                error,
                ..
            } => match error {
                RequestError::MissingParams(_) => StatusCode::BAD_REQUEST,
                RequestError::NotFound(_) => StatusCode::NOT_FOUND,
                RequestError::Fetch(e) | RequestError::Save(e) => match e {
                    RepoError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RepoError::ConstraintViolation(_) | RepoError::InvalidId(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    RepoError::Database { .. } | RepoError::Serialization(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                },
            },
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Self::BadRequest(message) => json!({ "message": message }),
            Self::Request { mode, error, .. } => match (mode, error) {
                (_, RequestError::MissingParams(message) | RequestError::NotFound(message)) => {
                    json!({ "message": message })
                }
                (ErrorMode::Compat, RequestError::Fetch(e) | RequestError::Save(e)) => {
                    json!({ "name": e.kind_name(), "message": e.to_string() })
                }
                (ErrorMode::Normalized, RequestError::Fetch(e) | RequestError::Save(e)) => {
                    json!({ "message": e.to_string() })
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Request {
            endpoint,
            error: RequestError::Fetch(e) | RequestError::Save(e),
            ..
        } = &self
        {
            tracing::warn!(endpoint = ?endpoint, error = %e, "Store operation failed");
        }
        send_json(self.status(), self.body())
    }
}
