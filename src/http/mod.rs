//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection (axum::serve)
//!     → server.rs (fallback handler, every method and path)
//!     → response.rs (configured headers, status, body)
//!     → request.rs (text dump, verbose only)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::HttpServer;
