//! Source retrieval.
//!
//! # Responsibilities
//! - Issue a single GET for the source URL
//! - Read the whole body into memory
//! - Classify failures: transport/status → `could not fetch image`,
//!   body read → `could not read image data` (both 400)
//!
//! # Design Decisions
//! - No retry; the first failure is terminal for the request
//! - The response is owned by `fetch` and dropped on every exit path
//! - By default there is no body cap and no timeout beyond the transport's
//!   own; both are opt-in through `[fetch]` config

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use url::Url;

use super::error::PipelineError;
use super::types::RawImage;
use crate::config::FetchConfig;

/// Retrieves raw bytes for a source URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawImage, PipelineError>;
}

/// [`Fetch`] over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: Option<usize>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            max_body_bytes: config.max_body_bytes,
        })
    }

    async fn read_body(&self, mut response: reqwest::Response) -> Result<Bytes, PipelineError> {
        let Some(limit) = self.max_body_bytes else {
            return response.bytes().await.map_err(PipelineError::unreadable_body);
        };

        if let Some(declared) = response.content_length() {
            if declared > limit as u64 {
                return Err(PipelineError::unreadable_body(format!(
                    "body of {} bytes exceeds limit of {} bytes",
                    declared, limit
                )));
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(PipelineError::unreadable_body)? {
            if body.len() + chunk.len() > limit {
                return Err(PipelineError::unreadable_body(format!(
                    "body exceeds limit of {} bytes",
                    limit
                )));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawImage, PipelineError> {
        let url = Url::parse(url).map_err(PipelineError::unreachable)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(PipelineError::unreachable)?;

        tracing::debug!(
            status = %response.status(),
            content_length = ?response.content_length(),
            "Source responded"
        );

        let bytes = self.read_body(response).await?;
        Ok(RawImage::new(bytes))
    }
}
