//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the listen port is present and usable
//! - Validate value ranges (fetch limits > 0 when set, resize limits > 0)
//! - Check addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot start, need a PORT")]
    MissingPort,
    #[error("listener.port must be greater than zero")]
    ZeroPort,
    #[error("listener.host must not be empty")]
    EmptyHost,
    #[error("fetch.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("fetch.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
    #[error("transform.{0} must be greater than zero")]
    ZeroResizeLimit(&'static str),
    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a fully merged configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.listener.port {
        None => errors.push(ValidationError::MissingPort),
        Some(0) => errors.push(ValidationError::ZeroPort),
        Some(_) => {}
    }
    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.fetch.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.fetch.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let transform = &config.transform;
    if transform.max_width == 0 {
        errors.push(ValidationError::ZeroResizeLimit("max_width"));
    }
    if transform.max_height == 0 {
        errors.push(ValidationError::ZeroResizeLimit("max_height"));
    }
    if transform.max_pixels == 0 {
        errors.push(ValidationError::ZeroResizeLimit("max_pixels"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }
    if !LOG_LEVELS.contains(&obs.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(obs.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.listener.port = Some(8080);
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_missing_port() {
        let errors = validate_config(&GatewayConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingPort]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.listener.port = Some(0);
        config.fetch.timeout_secs = Some(0);
        config.fetch.max_body_bytes = Some(0);
        config.observability.log_level = "loud".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
    }

    #[test]
    fn test_zero_resize_limits() {
        let mut config = valid();
        config.transform.max_width = 0;
        config.transform.max_pixels = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroResizeLimit("max_width"),
                ValidationError::ZeroResizeLimit("max_pixels"),
            ]
        );
        assert_eq!(
            errors[0].to_string(),
            "transform.max_width must be greater than zero"
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = valid();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }
}
