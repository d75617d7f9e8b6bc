//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Lifecycle and request handlers produce:
//!     → tracing events (startup, bind address, request dumps, errors)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → sync_writer.rs (one lock around stdout)
//! ```
//!
//! # Design Decisions
//! - A single sink: all log output is serialized through one mutex
//! - Request dumps are ordinary `info` events, not a separate access log

pub mod logging;
pub mod sync_writer;

pub use sync_writer::SyncWriter;
