//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) unless the client sent one
//! - Turn the `/img` query string into an [`ImageRequest`]
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - First occurrence of a query key wins; an empty value counts as missing
//! - `url` is checked before `size`

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::pipeline::{ImageRequest, PipelineError};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build an [`ImageRequest`] from the raw query string of `GET /img`.
pub fn parse_image_query(query: Option<&str>) -> Result<ImageRequest, PipelineError> {
    let query = query.unwrap_or_default();

    let url = query_value(query, "url").ok_or_else(|| PipelineError::missing_parameter("url"))?;
    let size =
        query_value(query, "size").ok_or_else(|| PipelineError::missing_parameter("size"))?;

    Ok(ImageRequest::new(url, size))
}

fn query_value(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ErrorKind;

    #[test]
    fn test_parses_both_parameters() {
        let req = parse_image_query(Some(
            "url=http%3A%2F%2Forigin%2Fa.png%3Fv%3D1&size=100x100%21",
        ))
        .unwrap();
        assert_eq!(req.source_url, "http://origin/a.png?v=1");
        assert_eq!(req.size_spec.as_str(), "100x100!");
    }

    #[test]
    fn test_percent_sign_decoded() {
        let req = parse_image_query(Some("size=50%25&url=http://o/a.gif")).unwrap();
        assert_eq!(req.size_spec.as_str(), "50%");
    }

    #[test]
    fn test_missing_url() {
        let err = parse_image_query(Some("size=10x10")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "missing parameter: url");
    }

    #[test]
    fn test_missing_size() {
        let err = parse_image_query(Some("url=http://o/a.png")).unwrap_err();
        assert_eq!(err.message(), "missing parameter: size");
    }

    #[test]
    fn test_url_checked_first() {
        let err = parse_image_query(None).unwrap_err();
        assert_eq!(err.message(), "missing parameter: url");
    }

    #[test]
    fn test_empty_value_is_missing() {
        let err = parse_image_query(Some("url=&size=10x10")).unwrap_err();
        assert_eq!(err.message(), "missing parameter: url");
    }

    #[test]
    fn test_first_value_wins() {
        let req = parse_image_query(Some("url=http://a/1.png&url=http://b/2.png&size=1x1")).unwrap();
        assert_eq!(req.source_url, "http://a/1.png");
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut maker = MakeRequestUuidV4;
        let req = Request::new(());
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
