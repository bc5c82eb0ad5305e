//! Default-option reuse across calls.
//!
//! A [`Session`] holds a fixed, ordered list of default options, copied at
//! construction and never mutated afterwards. Each call prepends the defaults
//! to the per-call options and dispatches as usual; because options fold left
//! to right and overwrite-by-key fields let later applications win, per-call
//! options transparently override session defaults for the same key. That
//! ordering guarantee is the entire override mechanism.
//!
//! Sessions are cheap to clone and safe to share across tasks: the default
//! list is read-only and every call builds an independent request.
//!
//! # Examples
//!
//! ```ignore
//! use reqkit::{header, timeout, Session};
//! use std::time::Duration;
//!
//! let session = Session::new(vec![
//!     header("X-Api-Key", "secret"),
//!     timeout(Duration::from_secs(5)),
//! ]);
//!
//! // Carries both defaults.
//! let a = session.get("http://example.com/a", &[]).await?;
//!
//! // The per-call header wins over the default for the same key.
//! let b = session
//!     .get("http://example.com/b", &[header("X-Api-Key", "override")])
//!     .await?;
//! ```

use crate::client;
use crate::error::Result;
use crate::options::Opt;
use crate::response::Response;
use http::Method;

/// A reusable bundle of default request options.
#[derive(Clone, Debug)]
pub struct Session {
    defaults: Vec<Opt>,
}

impl Session {
    /// Create a session with the given default options.
    ///
    /// The list is copied; later changes to the source have no effect on the
    /// session.
    pub fn new(defaults: impl Into<Vec<Opt>>) -> Self {
        Session {
            defaults: defaults.into(),
        }
    }

    /// Send a GET request with the session defaults applied first.
    pub async fn get(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::GET, target.as_ref(), opts).await
    }

    /// Send a POST request with the session defaults applied first.
    pub async fn post(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::POST, target.as_ref(), opts).await
    }

    /// Send a PUT request with the session defaults applied first.
    pub async fn put(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::PUT, target.as_ref(), opts).await
    }

    /// Send a PATCH request with the session defaults applied first.
    pub async fn patch(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::PATCH, target.as_ref(), opts).await
    }

    /// Send a DELETE request with the session defaults applied first.
    pub async fn delete(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::DELETE, target.as_ref(), opts).await
    }

    /// Send a HEAD request with the session defaults applied first.
    pub async fn head(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::HEAD, target.as_ref(), opts).await
    }

    /// Send an OPTIONS request with the session defaults applied first.
    pub async fn options(&self, target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
        self.dispatch(Method::OPTIONS, target.as_ref(), opts).await
    }

    async fn dispatch(&self, method: Method, target: &str, opts: &[Opt]) -> Result<Response> {
        let merged: Vec<Opt> = self.defaults.iter().chain(opts).cloned().collect();
        client::dispatch(method, target, &merged).await
    }
}
