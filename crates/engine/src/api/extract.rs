//! Body extractor for flat form or JSON payloads.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Accepts `application/json` or `application/x-www-form-urlencoded`.
/// Any other body is ignored and read as an empty object.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Other => serde_json::from_value(serde_json::json!({}))
                .map(Self)
                .map_err(|e| ApiError::BadRequest(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(content_type: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn detects_body_kind_from_content_type() {
        assert_eq!(body_kind(&request(Some("application/json"))), BodyKind::Json);
        assert_eq!(
            body_kind(&request(Some("application/json; charset=utf-8"))),
            BodyKind::Json
        );
        assert_eq!(
            body_kind(&request(Some("application/x-www-form-urlencoded"))),
            BodyKind::Form
        );
        assert_eq!(body_kind(&request(Some("text/plain"))), BodyKind::Other);
        assert_eq!(body_kind(&request(None)), BodyKind::Other);
    }
}
