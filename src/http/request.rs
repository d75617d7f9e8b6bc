//! Request dumping for verbose mode.
//!
//! # Responsibilities
//! - Serialize a request to text: request line, headers, blank line, body
//! - Bound the body buffered for the dump
//!
//! # Design Decisions
//! - `Host` is written first, taken from the header or the URI authority
//! - Remaining headers keep the order they were received in
//! - Non-UTF-8 bytes are replaced rather than treated as errors

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::header::HOST;
use axum::http::request::Parts;

/// Serialize `request` to text, buffering at most `limit` body bytes.
///
/// Fails if the body cannot be read or is larger than `limit`.
pub async fn dump_request(request: Request, limit: usize) -> Result<String, axum::Error> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, limit).await?;

    let mut dump = dump_head(&parts);
    dump.push_str(&String::from_utf8_lossy(&body));
    Ok(dump)
}

fn dump_head(parts: &Parts) -> String {
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .filter(|pq| !pq.is_empty())
        .unwrap_or("/");

    let mut head = format!("{} {} {:?}\r\n", parts.method, target, parts.version);

    let host = parts
        .headers
        .get(HOST)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .or_else(|| parts.uri.authority().map(|a| a.to_string()));
    if let Some(host) = host {
        head.push_str(&format!("Host: {host}\r\n"));
    }

    for (name, value) in parts.headers.iter().filter(|(name, _)| **name != HOST) {
        head.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    head.push_str("\r\n");
    head
}
