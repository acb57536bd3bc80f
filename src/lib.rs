//! HTTP image-transformation gateway.
//!
//! `GET /img?url=<source>&size=<spec>` fetches a remote image, detects its
//! format, resizes it and returns it in the same format.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::{Pipeline, PipelineError};
