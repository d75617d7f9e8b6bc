//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig (network, address)
//!     → listener.rs (resolve, bind tcp/tcp4/tcp6/unix)
//!     → BoundListener handed to the HTTP server
//!     → dropped at shutdown (socket closed, unix socket file removed)
//! ```

pub mod listener;

pub use listener::{BoundListener, ListenAddr, ListenerError};
