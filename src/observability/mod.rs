//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline and HTTP layer produce:
//!     → logging.rs (structured log events, one record per request)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (request spans with correlation IDs)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID flows through the request span
//! - Observability is write-only: nothing here influences a response

pub mod logging;
pub mod metrics;
pub mod tracing;
