//! Request error type: curl failure or unexpected HTTP status.

use std::fmt;

/// Error returned by a single tracker request.
#[derive(Debug)]
pub enum RequestError {
    /// Curl reported an error (DNS, connection, TLS, timeout, etc.).
    Curl(curl::Error),
    /// Final response (after redirects) had a non-2xx status.
    Http(u32),
}

impl From<curl::Error> for RequestError {
    fn from(e: curl::Error) -> Self {
        RequestError::Curl(e)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Curl(e) => write!(f, "{}", e),
            RequestError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Curl(e) => Some(e),
            RequestError::Http(_) => None,
        }
    }
}
