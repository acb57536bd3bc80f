//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types deserialize from TOML with per-field defaults.

use serde::Deserialize;

/// Root configuration for the image gateway.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Source fetch settings.
    pub fetch: FetchConfig,

    /// Resize output bounds.
    pub transform: TransformConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to listen on. Required; usually supplied through `PORT`.
    pub port: Option<u16>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

impl ListenerConfig {
    /// `host:port` to bind. An unset port binds an ephemeral one; validation
    /// rejects that for a loaded config.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or_default())
    }
}

/// Settings for retrieving source images.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds. Unset means the transport default.
    pub timeout_secs: Option<u64>,

    /// Maximum body size in bytes. Unset means unbounded.
    pub max_body_bytes: Option<usize>,

    /// User-Agent sent to the source.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_body_bytes: None,
            user_agent: concat!("image-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Bounds on resize targets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Widest output allowed, in pixels.
    pub max_width: u32,

    /// Tallest output allowed, in pixels.
    pub max_height: u32,

    /// Largest output area allowed, in pixels.
    pub max_pixels: u64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_width: 8192,
            max_height: 8192,
            max_pixels: 40_000_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
