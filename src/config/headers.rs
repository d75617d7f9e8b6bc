//! Response header accumulation from `name:value` tokens.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ConfigError;

/// Split a token on its first `:` into a header name and a trimmed value.
pub fn parse_header(token: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let (name, value) = token
        .split_once(':')
        .ok_or_else(|| ConfigError::MissingColon(token.to_string()))?;

    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
        ConfigError::InvalidHeaderName {
            token: token.to_string(),
            source,
        }
    })?;
    let value = HeaderValue::from_str(value.trim()).map_err(|source| {
        ConfigError::InvalidHeaderValue {
            token: token.to_string(),
            source,
        }
    })?;

    Ok((name, value))
}

/// Build a header map from tokens, appending repeated names in order.
///
/// Fails on the first malformed token.
pub fn accumulate_headers<I, S>(tokens: I) -> Result<HeaderMap, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers = HeaderMap::new();
    for token in tokens {
        let (name, value) = parse_header(token.as_ref())?;
        headers.append(name, value);
    }
    Ok(headers)
}
