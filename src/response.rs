//! Response wrapper and body materialization.
//!
//! [`Response`] wraps the raw transport response, exposing status, headers,
//! and the final URL immediately, while the body is materialized lazily: the
//! first call to [`bytes`](Response::bytes), [`text`](Response::text), or
//! [`json`](Response::json) performs the one and only read of the underlying
//! stream, closes it, and caches the outcome. Every call, including the
//! triggering one, observes the same cached bytes or the same cached error.
//!
//! Concurrent materialization calls on one wrapper are serialized internally,
//! but the contract remains "first caller wins the read"; callers should
//! serialize access themselves rather than rely on it.
//!
//! # Examples
//!
//! ```ignore
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Item { name: String }
//!
//! let resp = reqkit::get("http://example.com/item", &[]).await?;
//! println!("status: {}", resp.status_code());
//! let item: Item = resp.json().await?;
//! ```

use crate::error::{Error, Result};
use bytes::Bytes;
use http::header::AsHeaderName;
use http::{HeaderMap, StatusCode};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::fmt;
use tokio::sync::OnceCell;
use url::Url;

/// A received HTTP response with lazy, cached body access.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    raw: Mutex<Option<reqwest::Response>>,
    body: OnceCell<std::result::Result<Bytes, String>>,
}

impl Response {
    pub(crate) fn new(resp: reqwest::Response) -> Self {
        Response {
            status: resp.status(),
            headers: resp.headers().clone(),
            url: resp.url().clone(),
            raw: Mutex::new(Some(resp)),
            body: OnceCell::new(),
        }
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response status as a bare number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The first value of the named header, if present and valid UTF-8.
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The final URL of the response, after any followed redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Detach and return the raw transport response, if the body has not
    /// been materialized yet.
    ///
    /// After detaching, [`bytes`](Response::bytes) and the accessors built on
    /// it reject with [`Error::NilResponse`].
    pub fn take_raw(&self) -> Option<reqwest::Response> {
        self.raw.lock().take()
    }

    /// Read the response body, caching it on first call.
    ///
    /// The underlying stream is read at most once and closed after the read
    /// attempt whether it succeeds or fails; repeated calls return the same
    /// cached bytes or the same cached read error.
    pub async fn bytes(&self) -> Result<Bytes> {
        if self.body.get().is_none() && self.raw.lock().is_none() {
            return Err(Error::NilResponse);
        }
        let cached = self
            .body
            .get_or_init(|| async {
                let raw = self.raw.lock().take();
                match raw {
                    Some(resp) => resp.bytes().await.map_err(|e| e.to_string()),
                    None => Err("response body unavailable".to_string()),
                }
            })
            .await;
        match cached {
            Ok(bytes) => Ok(bytes.clone()),
            Err(msg) => Err(Error::Response(msg.clone())),
        }
    }

    /// Read the response body as text.
    ///
    /// Invalid UTF-8 is replaced, not rejected; errors are those of
    /// [`bytes`](Response::bytes).
    pub async fn text(&self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Decode the response body as JSON.
    ///
    /// An exactly-empty body yields [`Error::NoContent`] without attempting
    /// to decode; a decode failure yields a response error.
    pub async fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = self.bytes().await?;
        if bytes.is_empty() {
            return Err(Error::NoContent);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Response(format!("decoding response body: {}", e)))
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body_cached", &self.body.get().is_some())
            .finish()
    }
}
