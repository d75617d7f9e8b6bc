//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse args → Validate config → Install signal handlers → Bind listener
//!     → Spawn serving task → Log bound address
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → main task wakes → serving task dropped → exit 0
//! ```
//!
//! # Design Decisions
//! - One blocking point: the main task awaits the signal and nothing else
//! - Startup errors propagate to `main`, which logs them and exits non-zero

pub mod signals;
pub mod startup;

pub use startup::StartupError;
