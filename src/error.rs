//! Error types and result handling.
//!
//! Every failure surfaced by this crate is one variant of [`Error`], a coarse
//! taxonomy callers can branch on with the `is_*` predicates. Nothing is
//! retried internally and nothing is swallowed: dispatch and response
//! materialization both return their errors to the direct caller.
//!
//! A non-2xx response is special-cased: [`Error::Status`] carries the numeric
//! code *and* the still-usable [`Response`], so the body of an API error
//! payload can be inspected.
//!
//! # Examples
//!
//! ```ignore
//! use reqkit::{get, Error};
//!
//! match get("http://example.com/missing", &[]).await {
//!     Err(Error::Status { code, response }) => {
//!         eprintln!("server said {}: {}", code, response.text().await?);
//!     }
//!     Err(e) if e.is_timeout() => eprintln!("deadline exceeded: {}", e),
//!     Err(e) => eprintln!("request failed: {}", e),
//!     Ok(resp) => println!("ok: {}", resp.status_code()),
//! }
//! ```

use crate::response::Response;
use thiserror::Error as ThisError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by request dispatch and response materialization.
///
/// The variants form a fixed set of coarse categories. Request-build problems
/// (malformed URLs, unencodable payloads, bad header names) are always caught
/// before any network I/O; transport failures split into timeout and
/// everything-else; body problems split into read/decode failures, the
/// detached-wrapper case, and the empty-body case.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The request could not be built: malformed target or proxy URL, invalid
    /// header name or value, payload encoding failure, or a consumed
    /// single-use body. No network I/O was performed.
    #[error("request error: {0}")]
    Request(String),

    /// A transport-level failure that was not a timeout.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The per-call deadline was exceeded, or the transport reported a
    /// timeout condition.
    #[error("timeout: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The final response status was outside `200..=299`. The response is
    /// carried inside the error and its body remains readable.
    #[error("unexpected status: {code}")]
    Status {
        /// The HTTP status code of the final response.
        code: u16,
        /// The wrapped response, never discarded on a status error.
        response: Response,
    },

    /// Reading or decoding a response body failed.
    #[error("response error: {0}")]
    Response(String),

    /// Body materialization was attempted on a wrapper whose underlying
    /// response was detached with [`Response::take_raw`].
    #[error("nil response")]
    NilResponse,

    /// Structured decoding was attempted on a body of exactly zero bytes.
    #[error("empty response body")]
    NoContent,
}

impl Error {
    /// True for request-build errors (detected before any network I/O).
    pub fn is_request(&self) -> bool {
        matches!(self, Error::Request(_))
    }

    /// True for transport failures other than timeouts.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// True when the call exceeded its deadline or the transport timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// True when the final response had a non-2xx status.
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status { .. })
    }

    /// True when reading or decoding a response body failed.
    pub fn is_response(&self) -> bool {
        matches!(self, Error::Response(_))
    }

    /// True when materialization was attempted on a detached wrapper.
    pub fn is_nil_response(&self) -> bool {
        matches!(self, Error::NilResponse)
    }

    /// True when structured decoding hit an exactly-empty body.
    pub fn is_no_content(&self) -> bool {
        matches!(self, Error::NoContent)
    }

    /// The HTTP status code, for [`Error::Status`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The response carried by an [`Error::Status`] error.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Consumes the error, returning the response carried by an
    /// [`Error::Status`] error.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Error::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let err = Error::Request("invalid proxy url".to_string());
        assert_eq!(err.to_string(), "request error: invalid proxy url");
        assert!(err.is_request());
        assert!(!err.is_network());
    }

    #[test]
    fn test_no_content_is_distinct_from_response() {
        let no_content = Error::NoContent;
        let decode = Error::Response("decoding response body".to_string());
        assert!(no_content.is_no_content());
        assert!(!no_content.is_response());
        assert!(decode.is_response());
        assert!(!decode.is_no_content());
    }

    #[test]
    fn test_status_accessors_empty_for_other_categories() {
        let err = Error::NilResponse;
        assert!(err.status().is_none());
        assert!(err.response().is_none());
        assert!(err.into_response().is_none());
    }
}
