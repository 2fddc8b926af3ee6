//! Detail envelope
//!
//! Every plain acknowledgement and every error leaves the API as
//! `{"detail": "<message>"}` with the HTTP status carrying the outcome.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;

/// `{"detail": ...}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailBody {
    pub detail: Cow<'static, str>,
}

/// Detail message paired with a status code.
#[derive(Debug, Clone)]
pub struct Detail {
    status: StatusCode,
    body: DetailBody,
}

impl Detail {
    pub fn with_status(status: StatusCode, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            body: DetailBody {
                detail: detail.into(),
            },
        }
    }

    /// 200 OK
    pub fn ok(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(StatusCode::OK, detail)
    }

    /// 201 Created
    pub fn created(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(StatusCode::CREATED, detail)
    }

    /// 202 Accepted
    pub fn accepted(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(StatusCode::ACCEPTED, detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.body.detail
    }
}

impl IntoResponse for Detail {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
