//! Canned-response HTTP debugging server.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args / TOML ──▶ config ──▶ ServerConfig (immutable, Arc-shared)
//!                                        │
//!   Client Request ──▶ net::listener ──▶ http::server ──▶ http::response ──▶ Client
//!                                        │
//!                                        └─(verbose)─▶ http::request dump
//!                                                        │
//!                                        observability::SyncWriter ──▶ stdout
//!
//!   lifecycle: bind → spawn serving task → wait for SIGINT/SIGTERM → exit
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use observability::SyncWriter;
