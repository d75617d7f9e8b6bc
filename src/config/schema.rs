//! Configuration schema definitions.
//!
//! [`ConfigFile`] is the raw, optional-everything form read from TOML.
//! [`ServerConfig`] is the validated form every subsystem reads.

use std::fmt;
use std::str::FromStr;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;

use crate::config::ConfigError;

/// Default response body.
pub const DEFAULT_BODY: &str = "OK";
/// Default response status.
pub const DEFAULT_STATUS: u16 = 200;
/// Default listen address.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";
/// Largest request body dumped in verbose mode (16 MiB).
pub const DEFAULT_DUMP_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Listener network type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// TCP over IPv4 or IPv6.
    #[default]
    Tcp,
    /// TCP over IPv4 only.
    Tcp4,
    /// TCP over IPv6 only.
    Tcp6,
    /// Unix domain stream socket; the address is a filesystem path.
    Unix,
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "tcp4" => Ok(Self::Tcp4),
            "tcp6" => Ok(Self::Tcp6),
            "unix" => Ok(Self::Unix),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tcp => "tcp",
            Self::Tcp4 => "tcp4",
            Self::Tcp6 => "tcp6",
            Self::Unix => "unix",
        })
    }
}

/// Validated, immutable server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Response body; nothing is written when empty.
    pub body: Bytes,

    /// Response status code.
    pub status: StatusCode,

    /// Response headers, each name with its values in submission order.
    pub headers: HeaderMap,

    /// Log every received request.
    pub verbose: bool,

    /// Listener network type.
    pub network: Network,

    /// Listen address, or socket path for [`Network::Unix`].
    pub address: String,

    /// Largest request body buffered for a verbose dump.
    pub dump_body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            body: Bytes::from_static(DEFAULT_BODY.as_bytes()),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            verbose: false,
            network: Network::Tcp,
            address: DEFAULT_ADDRESS.to_string(),
            dump_body_limit: DEFAULT_DUMP_BODY_LIMIT,
        }
    }
}

/// Config file contents. Unset fields fall back to CLI flags or defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub body: Option<String>,
    pub status: Option<u16>,
    pub network: Option<String>,
    pub address: Option<String>,
    pub verbose: Option<bool>,
    pub dump_body_limit: Option<usize>,
    /// `name:value` tokens, applied before CLI positional headers.
    pub headers: Vec<String>,
}
