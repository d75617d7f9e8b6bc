//! Configuration validation.
//!
//! # Responsibilities
//! - Turn raw strings and integers into typed HTTP values
//! - Reject malformed headers, out-of-range status codes and unknown networks
//!
//! # Design Decisions
//! - Fails on the first error; startup aborts either way
//! - Validation runs before any socket is bound

use axum::body::Bytes;
use axum::http::StatusCode;

use crate::config::headers::accumulate_headers;
use crate::config::schema::DEFAULT_STATUS;
use crate::config::{ConfigError, ConfigFile, Network, ServerConfig};

/// Validate a status code for use as a final response.
///
/// Informational (1xx) codes cannot end an exchange; hyper would replace
/// them with 500 on the wire.
pub fn validate_status(code: u16) -> Result<StatusCode, ConfigError> {
    match StatusCode::from_u16(code) {
        Ok(status) if !status.is_informational() => Ok(status),
        _ => Err(ConfigError::InvalidStatus(code)),
    }
}

/// Validate merged raw settings into a [`ServerConfig`].
pub fn validate_config(raw: ConfigFile) -> Result<ServerConfig, ConfigError> {
    let defaults = ServerConfig::default();

    let headers = accumulate_headers(&raw.headers)?;
    let status = validate_status(raw.status.unwrap_or(DEFAULT_STATUS))?;
    let network = match raw.network.as_deref() {
        Some(name) => name.parse::<Network>()?,
        None => defaults.network,
    };

    Ok(ServerConfig {
        body: raw.body.map(Bytes::from).unwrap_or(defaults.body),
        status,
        headers,
        verbose: raw.verbose.unwrap_or(defaults.verbose),
        network,
        address: raw.address.unwrap_or(defaults.address),
        dump_body_limit: raw.dump_body_limit.unwrap_or(defaults.dump_body_limit),
    })
}
