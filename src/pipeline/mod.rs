//! Image transformation pipeline.
//!
//! # Data Flow
//! ```text
//! ImageRequest { url, size }
//!     → fetch.rs (GET source, whole body)          400 on failure
//!     → detect.rs (signature + header sniffing)    501 on failure
//!     → transform.rs (decode → resize → encode)    501 on failure
//!     → ImageResult { bytes, format, timings }
//! ```
//!
//! # Design Decisions
//! - Stages run strictly in sequence; no retries, no partial results
//! - Status codes derive from the error kind only (see `error.rs`)
//! - The output is always encoded in the detected input format
//! - The size spec is parsed by the transformer, not up front

pub mod detect;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod size;
pub mod timing;
pub mod transform;
pub mod types;

pub use detect::detect;
pub use error::{status_code, ErrorClass, ErrorKind, PipelineError};
pub use fetch::{Fetch, HttpFetcher};
pub use orchestrator::Pipeline;
pub use size::{Geometry, SizeSpec, SizeSpecError};
pub use timing::{StageTimings, X_IMAGE_TIMINGS};
pub use transform::{ImageHandle, RasterTransformer, ResizeLimits, Transformer};
pub use types::{ImageFormat, ImageRequest, ImageResult, RawImage};
