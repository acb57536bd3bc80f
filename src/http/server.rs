//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Dispatch `/img` requests to the pipeline

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::HeaderName,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::index::index_handler;
use crate::http::request::{parse_image_query, MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::{metrics, tracing::make_request_span};
use crate::pipeline::{HttpFetcher, Pipeline, RasterTransformer, ResizeLimits};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

/// HTTP server for the image gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server with the production fetcher and transformer.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let transformer = RasterTransformer::with_limits(ResizeLimits::from(&config.transform));
        let pipeline = Pipeline::new(Arc::new(fetcher), Arc::new(transformer));
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create a server around an existing pipeline.
    pub fn with_pipeline(config: GatewayConfig, pipeline: Pipeline) -> Self {
        let router = Self::build_router(AppState { pipeline });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/", get(index_handler))
            .route("/img", get(image_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                    .layer(PropagateRequestIdLayer::new(request_id)),
            )
    }

    /// A clone of the router, for driving the server without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// `GET /img?url=<source>&size=<spec>`
async fn image_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let started = Instant::now();

    let response = match parse_image_query(query.as_deref()) {
        Ok(request) => match state.pipeline.run(&request).await {
            Ok(result) => result.into_response(),
            Err(err) => err.into_response(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "Rejected request");
            err.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), started);
    response
}
