//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::{Form, Json};

use super::error::ApiError;
use crate::models::{Pagination, PaginationParams, WinePayload};

/// Wine id from the `{id}` path segment.
///
/// Anything that is not a positive integer cannot name a row, so it is
/// reported as not found rather than as a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WineId(pub i64);

impl<S> FromRequestParts<S> for WineId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::BadRequest {
                message: rej.body_text(),
            })?;

        parse_id(&raw).map(Self).ok_or(ApiError::NotFound {
            resource: "wine",
            id: raw,
        })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Wine fields from a JSON or form-encoded body.
#[derive(Debug, Clone)]
pub struct WineBody(pub WinePayload);

impl<S> FromRequest<S> for WineBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let media = content_type.as_deref().map(media_type);

        match media.as_deref() {
            Some("application/json") => {
                let Json(payload) = Json::<WinePayload>::from_request(req, state)
                    .await
                    .map_err(|rej| body_rejection(rej.status(), rej.body_text()))?;
                Ok(Self(payload))
            }
            Some("application/x-www-form-urlencoded") => {
                let Form(payload) = Form::<WinePayload>::from_request(req, state)
                    .await
                    .map_err(|rej| body_rejection(rej.status(), rej.body_text()))?;
                Ok(Self(payload))
            }
            _ => Err(ApiError::UnsupportedMediaType { content_type }),
        }
    }
}

/// Keep 413 from the body limit; every other body failure is a 400.
fn body_rejection(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { message }
    } else {
        ApiError::BadRequest { message }
    }
}

/// Page window from `?page=&per_page=`, clamped into range.
///
/// Values that do not parse as unsigned integers are a 400 with the usual
/// JSON error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub Pagination);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<PaginationParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rej| ApiError::BadRequest {
                message: rej.body_text(),
            })?;

        Ok(Self(Pagination::from(params)))
    }
}

/// `application/json; charset=utf-8` -> `application/json`
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
