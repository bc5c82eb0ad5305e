//! The per-call request configuration unit and URL composition.
//!
//! A [`Request`] is built fresh for every call by folding an ordered list of
//! options ([`Opt`](crate::Opt)) over a default value, strictly left to right.
//! It is consumed by dispatch and never retained or reused.
//!
//! Option application never panics and never aborts the fold: an option that
//! fails (malformed proxy URL, unencodable JSON payload, invalid header name)
//! records the first error in the [`Request`]'s terminal error slot, and
//! dispatch rejects the call before any network I/O.
//!
//! # URL composition
//!
//! When no additive query parameters were folded in, the target URL is used
//! verbatim: its original query string is preserved including ordering and
//! duplicates. Once additive parameters are present, the existing query is
//! merged with them (values appended per key, never replaced) and the full
//! set is re-encoded sorted by key. Callers must not depend on the original
//! ordering in that case.

use crate::error::{Error, Result};
use http::{HeaderMap, Method};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Request state assembled by folding options.
///
/// Built internally by dispatch; the enumerated option constructors in
/// [`crate::options`] are the only way to configure one.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<reqwest::Body>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cookies: Vec<(String, String)>,
    pub(crate) proxy: Option<Url>,
    pub(crate) redirect_max: Option<usize>,
    pub(crate) decompress_gzip: bool,
    pub(crate) err: Option<Error>,
}

impl Request {
    pub(crate) fn new(method: Method, target: &str) -> Self {
        Request {
            method,
            url: target.to_string(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            cookies: Vec::new(),
            proxy: None,
            redirect_max: None,
            decompress_gzip: false,
            err: None,
        }
    }

    /// Fold the given options into this request, left to right.
    pub(crate) fn apply(&mut self, opts: &[crate::Opt]) {
        for opt in opts {
            opt.apply(self);
        }
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw target URL the request was created with.
    pub fn target(&self) -> &str {
        &self.url
    }

    /// The terminal configuration error, if any option recorded one.
    pub fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Compose the final URL from the raw target and the additive query
    /// parameters.
    pub(crate) fn build_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| Error::Request(format!("invalid url {:?}: {}", self.url, e)))?;
        if self.query.is_empty() {
            return Ok(url);
        }

        // Existing pairs first, additive pairs appended after, keys sorted on
        // re-encode. Value order within a key is preserved.
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in url.query_pairs() {
            merged.entry(k.into_owned()).or_default().push(v.into_owned());
        }
        for (k, v) in &self.query {
            merged.entry(k.clone()).or_default().push(v.clone());
        }

        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, values) in &merged {
            for value in values {
                pairs.append_pair(key, value);
            }
        }
        drop(pairs);
        Ok(url)
    }
}
