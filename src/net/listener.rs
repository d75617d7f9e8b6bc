//! Listener creation for every supported network type.
//!
//! # Responsibilities
//! - Resolve and bind TCP addresses, optionally restricted to one IP family
//! - Bind Unix domain sockets and remove the socket file when released
//! - Report the bound address for the startup log

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
#[cfg(unix)]
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::net::{lookup_host, TcpListener};

use crate::config::Network;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Address could not be resolved.
    #[error("Error creating listener: cannot resolve {address:?}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Address resolved, but not to the requested IP family.
    #[error("Error creating listener: no {network} address found for {address:?}")]
    NoAddress { network: Network, address: String },

    /// Failed to bind to address.
    #[error("Error creating listener: {network} {address}: {source}")]
    Bind {
        network: Network,
        address: String,
        #[source]
        source: io::Error,
    },

    /// Bound socket could not report its address.
    #[error("Error creating listener: {0}")]
    LocalAddr(#[source] io::Error),

    /// Network type not available on this platform.
    #[error("Error creating listener: network {0} is not supported on this platform")]
    Unsupported(Network),
}

/// A bound listener, ready to be served.
///
/// Dropping it closes the socket.
#[derive(Debug)]
pub enum BoundListener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixSocketListener),
}

/// Address a [`BoundListener`] accepts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddr {
    Tcp(SocketAddr),
    #[cfg(unix)]
    Unix(PathBuf),
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenAddr::Tcp(addr) => write!(f, "{addr}"),
            #[cfg(unix)]
            ListenAddr::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}

impl BoundListener {
    /// Bind `address` on `network`.
    pub async fn bind(network: Network, address: &str) -> Result<Self, ListenerError> {
        let listener = match network {
            Network::Tcp | Network::Tcp4 | Network::Tcp6 => {
                BoundListener::Tcp(bind_tcp(network, address).await?)
            }
            #[cfg(unix)]
            Network::Unix => BoundListener::Unix(UnixSocketListener::bind(address)?),
            #[cfg(not(unix))]
            Network::Unix => return Err(ListenerError::Unsupported(network)),
        };

        tracing::debug!(%network, address, "Listener bound");
        Ok(listener)
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> io::Result<ListenAddr> {
        match self {
            BoundListener::Tcp(listener) => listener.local_addr().map(ListenAddr::Tcp),
            #[cfg(unix)]
            BoundListener::Unix(listener) => Ok(ListenAddr::Unix(listener.path().to_path_buf())),
        }
    }
}

/// Wildcard candidates for a bare `:port`.
///
/// Plain `tcp` tries `[::]` first, which is dual-stack where the OS allows
/// it, and falls back to `0.0.0.0` when IPv6 is unavailable.
fn unspecified_candidates(network: Network, port: u16) -> Vec<SocketAddr> {
    let v4 = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let v6 = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    match network {
        Network::Tcp4 => vec![v4],
        Network::Tcp6 => vec![v6],
        _ => vec![v6, v4],
    }
}

fn family_matches(network: Network, addr: &SocketAddr) -> bool {
    match network {
        Network::Tcp4 => addr.is_ipv4(),
        Network::Tcp6 => addr.is_ipv6(),
        _ => true,
    }
}

async fn resolve_tcp(network: Network, address: &str) -> Result<Vec<SocketAddr>, ListenerError> {
    let resolve_error = |source| ListenerError::Resolve {
        address: address.to_string(),
        source,
    };

    if let Some(port) = address.strip_prefix(':') {
        let port = port
            .parse::<u16>()
            .map_err(|e| resolve_error(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
        return Ok(unspecified_candidates(network, port));
    }

    let resolved = lookup_host(address).await.map_err(resolve_error)?;
    Ok(resolved.filter(|c| family_matches(network, c)).collect())
}

/// Bind the first resolved candidate of the right family that accepts the bind.
async fn bind_tcp(network: Network, address: &str) -> Result<TcpListener, ListenerError> {
    let mut last_error = None;
    for candidate in resolve_tcp(network, address).await? {
        match TcpListener::bind(candidate).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::debug!(address = %candidate, error = %e, "Bind candidate failed");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(source) => ListenerError::Bind {
            network,
            address: address.to_string(),
            source,
        },
        None => ListenerError::NoAddress {
            network,
            address: address.to_string(),
        },
    })
}

/// A Unix domain socket listener that owns its socket file.
///
/// The file is removed when the listener is dropped.
#[cfg(unix)]
#[derive(Debug)]
pub struct UnixSocketListener {
    inner: tokio::net::UnixListener,
    path: PathBuf,
}

#[cfg(unix)]
impl UnixSocketListener {
    fn bind(path: &str) -> Result<Self, ListenerError> {
        let inner = tokio::net::UnixListener::bind(path).map_err(|source| ListenerError::Bind {
            network: Network::Unix,
            address: path.to_string(),
            source,
        })?;
        Ok(Self {
            inner,
            path: PathBuf::from(path),
        })
    }

    /// Filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
impl Drop for UnixSocketListener {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove socket file");
        }
    }
}

#[cfg(unix)]
impl axum::serve::Listener for UnixSocketListener {
    type Io = tokio::net::UnixStream;
    type Addr = tokio::net::unix::SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        axum::serve::Listener::accept(&mut self.inner).await
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        self.inner.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bare_port_expands_per_family() {
        let v4: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let v6: SocketAddr = "[::]:8080".parse().unwrap();
        assert_eq!(resolve_tcp(Network::Tcp, ":8080").await.unwrap(), vec![v6, v4]);
        assert_eq!(resolve_tcp(Network::Tcp4, ":8080").await.unwrap(), vec![v4]);
        assert_eq!(resolve_tcp(Network::Tcp6, ":8080").await.unwrap(), vec![v6]);
    }

    #[tokio::test]
    async fn bare_port_must_be_numeric() {
        let err = BoundListener::bind(Network::Tcp, ":http").await.unwrap_err();
        assert!(matches!(err, ListenerError::Resolve { .. }), "{err}");
        let err = BoundListener::bind(Network::Tcp, ":70000").await.unwrap_err();
        assert!(matches!(err, ListenerError::Resolve { .. }), "{err}");
    }

    #[tokio::test]
    async fn bare_tcp_port_binds_every_interface() {
        let listener = BoundListener::bind(Network::Tcp, ":0").await.unwrap();
        match listener.local_addr().unwrap() {
            ListenAddr::Tcp(addr) => {
                assert!(addr.ip().is_unspecified(), "{addr}");
                assert_ne!(addr.port(), 0);
            }
            #[cfg(unix)]
            other => panic!("unexpected address {other}"),
        }
    }

    #[tokio::test]
    async fn binds_ephemeral_tcp_port() {
        let listener = BoundListener::bind(Network::Tcp, "127.0.0.1:0").await.unwrap();
        match listener.local_addr().unwrap() {
            ListenAddr::Tcp(addr) => {
                assert!(addr.ip().is_loopback());
                assert_ne!(addr.port(), 0);
            }
            #[cfg(unix)]
            other => panic!("unexpected address {other}"),
        }
    }

    #[tokio::test]
    async fn tcp6_rejects_ipv4_only_address() {
        let err = BoundListener::bind(Network::Tcp6, "127.0.0.1:0").await.unwrap_err();
        assert!(matches!(err, ListenerError::NoAddress { network: Network::Tcp6, .. }));
    }

    #[tokio::test]
    async fn address_in_use_is_a_bind_error() {
        let first = BoundListener::bind(Network::Tcp4, "127.0.0.1:0").await.unwrap();
        let addr = first.local_addr().unwrap().to_string();

        let err = BoundListener::bind(Network::Tcp4, &addr).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }), "{err}");
        assert!(err.to_string().starts_with("Error creating listener"));
    }

    #[tokio::test]
    async fn unresolvable_address_is_rejected() {
        let err = BoundListener::bind(Network::Tcp, "not an address").await.unwrap_err();
        assert!(matches!(err, ListenerError::Resolve { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unix_socket_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dummysv.sock");
        let path_str = path.to_str().unwrap();

        let listener = BoundListener::bind(Network::Unix, path_str).await.unwrap();
        assert!(path.exists());
        assert_eq!(listener.local_addr().unwrap(), ListenAddr::Unix(path.clone()));

        drop(listener);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unix_socket_path_in_use_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busy.sock");
        let path_str = path.to_str().unwrap();

        let _first = BoundListener::bind(Network::Unix, path_str).await.unwrap();
        let err = BoundListener::bind(Network::Unix, path_str).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { network: Network::Unix, .. }));
    }
}
