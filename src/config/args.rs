//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::load_config;
use crate::config::validation::validate_config;
use crate::config::{ConfigError, ConfigFile, ServerConfig};

/// Respond to every HTTP request with a fixed status, body and headers.
#[derive(Debug, Parser)]
#[command(name = "dummysv", version)]
pub struct Args {
    /// The body to reply with [default: OK]
    #[arg(short = 'r', long = "body", value_name = "BODY")]
    pub body: Option<String>,

    /// The status code to respond with [default: 200]
    #[arg(short = 's', long = "status", value_name = "STATUS")]
    pub status: Option<u16>,

    /// The network to listen on: tcp, tcp4, tcp6 or unix [default: tcp]
    #[arg(short = 'n', long = "network", value_name = "NETWORK")]
    pub network: Option<String>,

    /// The address to listen on [default: 127.0.0.1:8080]
    ///
    /// A bare `:PORT` listens on every interface: `[::]` (dual-stack, falling
    /// back to `0.0.0.0`) for tcp, `0.0.0.0` for tcp4, `[::]` for tcp6.
    #[arg(short = 'L', long = "listen", value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Whether to log all received requests
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// TOML file supplying defaults for the options above
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Largest request body to include in a verbose dump, in bytes [default: 16777216]
    #[arg(long = "dump-limit", value_name = "BYTES")]
    pub dump_limit: Option<usize>,

    /// Response headers as name:value
    #[arg(value_name = "HEADER")]
    pub headers: Vec<String>,
}

impl Args {
    /// Merge flags over the config file (if any) and validate.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let file = match &self.config {
            Some(path) => load_config(path)?,
            None => ConfigFile::default(),
        };
        validate_config(self.merge_over(file))
    }

    fn merge_over(self, file: ConfigFile) -> ConfigFile {
        let mut headers = file.headers;
        headers.extend(self.headers);

        ConfigFile {
            body: self.body.or(file.body),
            status: self.status.or(file.status),
            network: self.network.or(file.network),
            address: self.address.or(file.address),
            verbose: if self.verbose { Some(true) } else { file.verbose },
            dump_body_limit: self.dump_limit.or(file.dump_body_limit),
            headers,
        }
    }
}
