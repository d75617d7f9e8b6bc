//! dummysv: a canned-response HTTP server for debugging clients.
//!
//! ```text
//! dummysv [-r BODY] [-s STATUS] [-n NETWORK] [-L ADDRESS] [-v] [HEADER:VALUE]...
//! ```
//!
//! Every request, whatever its method or path, gets the configured status,
//! body and headers. With `-v` each request is dumped to stdout.

use std::process::ExitCode;

use clap::Parser;

use dummysv::config::Args;
use dummysv::lifecycle::startup;
use dummysv::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    match startup::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
