//! Response writing.
//!
//! # Responsibilities
//! - Success: bytes with `Content-Type: image/<format>` and `X-Image-Timings`
//! - Failure: status from the error kind, message as plain-text body
//!
//! # Design Decisions
//! - Timings of completed stages are reported on failures too
//! - The status code never depends on the message text

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::pipeline::{ImageResult, PipelineError, StageTimings, X_IMAGE_TIMINGS};

fn insert_timings(response: &mut Response, timings: &StageTimings) {
    if let Some(value) = timings
        .header_value()
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        response.headers_mut().insert(X_IMAGE_TIMINGS, value);
    }
}

impl IntoResponse for ImageResult {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_static(self.format.content_type());
        let mut response =
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], self.bytes).into_response();
        insert_timings(&mut response, &self.timings);
        response
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.message().to_string()).into_response();
        insert_timings(&mut response, self.timings());
        response
    }
}
