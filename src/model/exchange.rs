//! Request/response descriptors handed over by the interception host.

use serde::Deserialize;

/// What the interceptors see of an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method, upper case.
    pub method: String,
    /// Full request URL including the query string.
    pub url: String,
}

impl RequestDescriptor {
    /// Describe a request.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// What the interceptors see of a completed response.
///
/// The body is kept as raw text; interceptors only parse it after the URL
/// has matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub response_text: String,
}

impl ResponseDescriptor {
    /// Describe a completed response.
    pub fn new(status: u16, response_text: impl Into<String>) -> Self {
        Self {
            status,
            response_text: response_text.into(),
        }
    }
}

/// One captured request/response pair, as stored in a capture file.
///
/// Capture lines carry the body either as `responseText` (raw string, as the
/// browser hands it over) or as an already-parsed `response` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// The outgoing request.
    pub request: RequestDescriptor,
    /// Its completed response.
    pub response: ResponseDescriptor,
}

#[derive(Debug, Deserialize)]
struct RawExchange {
    #[serde(default = "default_method")]
    method: String,
    url: String,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(rename = "responseText", default)]
    response_text: Option<String>,
    #[serde(default)]
    response: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status() -> u16 {
    200
}

impl Exchange {
    /// Pair a request with its response.
    pub fn new(request: RequestDescriptor, response: ResponseDescriptor) -> Self {
        Self { request, response }
    }

    /// Parse one capture line.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the line is not a capture record.
    pub fn from_capture_line(line: &str) -> Result<Self, serde_json::Error> {
        let raw: RawExchange = serde_json::from_str(line)?;
        let body = match (raw.response_text, raw.response) {
            (Some(text), _) => text,
            (None, Some(value)) => value.to_string(),
            (None, None) => String::new(),
        };
        Ok(Self {
            request: RequestDescriptor::new(raw.method, raw.url),
            response: ResponseDescriptor::new(raw.status, body),
        })
    }
}
