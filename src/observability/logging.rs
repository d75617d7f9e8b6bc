//! Process-wide logging setup.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber
//! - Route every event through one [`SyncWriter`] over stdout
//!
//! # Design Decisions
//! - Log filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
//! - Colors only when stdout is a terminal, so piped output stays greppable

use std::io::{self, IsTerminal};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::observability::SyncWriter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "dummysv=info";

/// Initialize the global subscriber writing timestamped lines to stdout.
///
/// Must be called once, before the first event is emitted.
pub fn init() {
    let sink = SyncWriter::new(io::stdout());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(sink)
                .with_ansi(io::stdout().is_terminal())
                .with_target(false),
        )
        .init();
}
