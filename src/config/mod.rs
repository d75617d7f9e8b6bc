//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (args.rs) ─┐
//! config file (loader.rs, optional TOML) ─┤
//!                                          → merged ConfigFile (flags win)
//!                                          → validation.rs (+ headers.rs)
//!                                          → ServerConfig (validated, immutable)
//!                                          → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; nothing reloads it
//! - Every field has a default so no flag is required
//! - Any error here is fatal and happens before a listener is bound

pub mod args;
pub mod error;
pub mod headers;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use error::ConfigError;
pub use schema::{ConfigFile, Network, ServerConfig};
