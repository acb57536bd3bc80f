//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID + trace layers)
//!     → request.rs (query → ImageRequest, 401 on missing parameters)
//!     → pipeline (fetch → detect → transform)
//!     → response.rs (image bytes or error, timing header)
//!     → Send to client
//! ```

pub mod index;
pub mod request;
pub mod response;
pub mod server;

pub use request::{parse_image_query, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
