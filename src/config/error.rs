//! Configuration errors.
//!
//! Every variant is fatal at startup.

use std::path::PathBuf;

use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

/// Errors that can occur while building a [`ServerConfig`](super::ServerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Header token has no `:` separator.
    #[error("Invalid header {0:?}: missing ':'")]
    MissingColon(String),

    /// Text before the first `:` is not a valid header name.
    #[error("Invalid header {token:?}: bad name: {source}")]
    InvalidHeaderName {
        token: String,
        #[source]
        source: InvalidHeaderName,
    },

    /// Text after the first `:` contains bytes not allowed in a header value.
    #[error("Invalid header {token:?}: bad value: {source}")]
    InvalidHeaderValue {
        token: String,
        #[source]
        source: InvalidHeaderValue,
    },

    /// Status code outside 200..=999.
    #[error(
        "Invalid status code {0}: must be between 200 and 999 (1xx codes cannot be sent as a final response)"
    )]
    InvalidStatus(u16),

    /// Network type not supported by the listener.
    #[error("Unknown network {0:?}: expected one of tcp, tcp4, tcp6, unix")]
    UnknownNetwork(String),

    /// Config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ConfigFile`](super::ConfigFile).
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
