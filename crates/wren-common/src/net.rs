//! HTTP fetch for the wren layout engine.
//!
//! A thin blocking GET wrapper used by the view façade. Redirects are
//! deliberately **not** followed here: the view implements `Location`
//! handling itself (with its own resolution rules and loop cap), so the
//! client is built with redirects disabled and the raw 3xx response is
//! returned to the caller.
//!
//! TODO: Implement proper Fetch Standard (<https://fetch.spec.whatwg.org/>)

use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for [`fetch`].
///
/// Only transport-level failures are errors: a response with a non-success
/// status still carries headers and a body the caller may want (redirect
/// targets in particular), so status handling is left to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed before a response was received.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// An HTTP response: status, headers, raw body bytes.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in wire order, names lowercased.
    headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Construct a response from already-collected parts (used by tests).
    #[must_use]
    pub fn from_parts(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Look up the first header with the given name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(header_name, _)| *header_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// All headers in wire order, names lowercased.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Perform a blocking GET request and return the raw response.
///
/// Redirects are not followed; a 3xx response is returned as-is so the
/// caller can resolve its `Location` header itself.
///
/// # Errors
///
/// Returns a [`FetchError`] if the client cannot be created, the request
/// fails in transit, or the body cannot be read.
pub fn fetch(url: &str) -> Result<Response, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Transport)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.bytes().map_err(FetchError::Body)?.to_vec();

    Ok(Response {
        status,
        headers,
        body,
    })
}
