//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader};
use std::net::SocketAddr;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use dummysv::config::Network;
use dummysv::net::{BoundListener, ListenAddr};
use dummysv::{HttpServer, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Serve `config` on an ephemeral loopback port inside the test runtime.
pub async fn start_server(config: ServerConfig) -> SocketAddr {
    let listener = BoundListener::bind(Network::Tcp4, "127.0.0.1:0").await.unwrap();
    let addr = match listener.local_addr().unwrap() {
        ListenAddr::Tcp(addr) => addr,
        #[cfg(unix)]
        other => panic!("unexpected listen address {other}"),
    };

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// Send a raw HTTP/1.1 request and return the raw response.
///
/// The request should carry `Connection: close` so the read terminates.
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .unwrap();
    String::from_utf8(response).unwrap()
}

/// Response header lines (lowercased name, value) in wire order.
pub fn header_lines(raw: &str) -> Vec<(String, String)> {
    let head = raw.split("\r\n\r\n").next().unwrap();
    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// The compiled binary, running with captured stdout.
pub struct RunningBinary {
    child: Child,
    lines: mpsc::Receiver<String>,
    seen: String,
    reader: Option<JoinHandle<String>>,
}

impl RunningBinary {
    /// Spawn the binary and wait for its "Listening on" line.
    pub fn start(args: &[&str]) -> (Self, String) {
        let mut child = Command::new(env!("CARGO_BIN_EXE_dummysv"))
            .args(args)
            .env_remove("RUST_LOG")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let (tx, lines) = mpsc::channel();
        let reader = std::thread::spawn(move || {
            let mut reader = BufReader::new(stdout);
            let mut all = String::new();
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap_or(0) > 0 {
                all.push_str(&line);
                let _ = tx.send(line.clone());
                line.clear();
            }
            all
        });

        let mut running = Self {
            child,
            lines,
            seen: String::new(),
            reader: Some(reader),
        };
        let addr = running.wait_for_listening();
        (running, addr)
    }

    fn wait_for_listening(&mut self) -> String {
        loop {
            let line = self
                .lines
                .recv_timeout(Duration::from_secs(10))
                .expect("binary never reported its listen address");
            self.seen.push_str(&line);
            if let Some((_, addr)) = line.split_once("Listening on ") {
                return addr.trim().to_string();
            }
        }
    }

    /// Block until the stdout read so far satisfies `done`.
    pub fn wait_for_output(&mut self, done: impl Fn(&str) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !done(&self.seen) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => self.seen.push_str(&line),
                Err(_) => panic!("expected output never appeared:\n{}", self.seen),
            }
        }
    }

    /// Send SIGINT and collect the exit status and full stdout.
    #[cfg(unix)]
    pub fn interrupt(mut self) -> (ExitStatus, String) {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        kill(Pid::from_raw(self.child.id() as i32), Signal::SIGINT).unwrap();
        let status = self.child.wait().unwrap();
        let output = self.reader.take().unwrap().join().unwrap();
        (status, output)
    }
}

impl Drop for RunningBinary {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Whether `line` opens with an RFC 3339 timestamp such as `2024-05-01T12:00:00.000000Z`.
pub fn starts_with_timestamp(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() > 19
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b'T'
        && b[13] == b':'
        && b[16] == b':'
}
