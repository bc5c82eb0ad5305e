//! Functional request options.
//!
//! Every aspect of a call beyond its verb and target (headers, query
//! parameters, bodies, cookies, timeout, proxy, redirect cap, gzip) is
//! configured by passing options to the verb functions. Each constructor in
//! this module returns an [`Opt`]: a small, independent mutation applied to
//! the request builder in the order given.
//!
//! Options are cheap to clone and safe to share, so a [`Session`](crate::Session)
//! can hold one list of defaults and reuse it across concurrent calls.
//!
//! # Failure behavior
//!
//! An option that cannot do its job (malformed proxy URL, unencodable JSON
//! value, invalid header name) does not panic and does not abort the fold. It
//! records the first such error in the request's terminal error slot; options
//! that can fail check the slot first and no-op once it is set, while
//! non-erroring options still proceed. Dispatch rejects the call before any
//! network I/O when the slot is set.
//!
//! # Overwrite vs. append
//!
//! | Option | Effect on repeated application |
//! |--------|--------------------------------|
//! | [`header`] / [`headers`] | Overwrite by key |
//! | [`query`] | Additive, repeated keys kept |
//! | [`cookies`] | Additive, append order kept |
//! | [`json`] / [`form`] / [`body`] | Overwrite the body |
//! | [`timeout`] / [`proxy`] / [`redirect`] | Last application wins |
//!
//! `json` sets `Content-Type: application/json` only when the header is
//! absent; `form` always overwrites `Content-Type`. The asymmetry is
//! intentional and covered by tests.

use crate::error::Error;
use crate::request::Request;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A single request configuration step.
///
/// Produced by the constructors in this module and consumed by the verb
/// functions and [`Session`](crate::Session) methods. Cloning an `Opt` is
/// cheap (it is reference-counted).
#[derive(Clone)]
pub struct Opt {
    f: Arc<dyn Fn(&mut Request) + Send + Sync + 'static>,
}

impl Opt {
    fn new(f: impl Fn(&mut Request) + Send + Sync + 'static) -> Self {
        Opt { f: Arc::new(f) }
    }

    pub(crate) fn apply(&self, req: &mut Request) {
        (self.f)(req)
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opt")
    }
}

fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue), Error> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| Error::Request(format!("invalid header name {:?}: {}", key, e)))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::Request(format!("invalid value for header {:?}: {}", key, e)))?;
    Ok((name, value))
}

/// Set a single header, overwriting any existing value for the key.
pub fn header(key: impl Into<String>, value: impl Into<String>) -> Opt {
    let key = key.into();
    let value = value.into();
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        match parse_header(&key, &value) {
            Ok((name, value)) => {
                req.headers.insert(name, value);
            }
            Err(e) => req.err = Some(e),
        }
    })
}

/// Set multiple headers, overwriting existing values key by key.
pub fn headers<I, K, V>(pairs: I) -> Opt
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        for (key, value) in &pairs {
            match parse_header(key, value) {
                Ok((name, value)) => {
                    req.headers.insert(name, value);
                }
                Err(e) => {
                    req.err = Some(e);
                    return;
                }
            }
        }
    })
}

/// Append query parameters. Repeated keys are kept, never replaced.
pub fn query<I, K, V>(pairs: I) -> Opt
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Opt::new(move |req| {
        req.query.extend(pairs.iter().cloned());
    })
}

/// Set the per-call timeout covering connect and transfer.
///
/// A zero duration means no override; the transport default stays in effect.
pub fn timeout(duration: Duration) -> Opt {
    Opt::new(move |req| {
        req.timeout = Some(duration);
    })
}

/// Request gzip-compressed responses and decompress them transparently.
///
/// Without this option no `Accept-Encoding: gzip` header is sent and bodies
/// are returned as received. The decompression itself is delegated to the
/// transport.
pub fn decompress_gzip() -> Opt {
    Opt::new(|req| {
        req.decompress_gzip = true;
    })
}

/// Encode `value` as JSON and use it as the request body.
///
/// Sets `Content-Type: application/json` only when the header is absent, so a
/// caller-supplied `Content-Type` always wins. An unencodable value records a
/// request-build error.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Opt {
    let encoded = serde_json::to_vec(value).map_err(|e| format!("encoding json body: {}", e));
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        match &encoded {
            Ok(bytes) => {
                req.body = Some(reqwest::Body::from(bytes.clone()));
                if !req.headers.contains_key(CONTENT_TYPE) {
                    req.headers
                        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
            }
            Err(msg) => req.err = Some(Error::Request(msg.clone())),
        }
    })
}

/// Encode the pairs as `application/x-www-form-urlencoded` and use the result
/// as the request body.
///
/// Unlike [`json`], this always overwrites the `Content-Type` header, even if
/// the caller set a different value first.
pub fn form<I, K, V>(pairs: I) -> Opt
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        req.body = Some(reqwest::Body::from(encoded.clone()));
        req.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
    })
}

/// Use a raw body as-is.
///
/// The body is single-use: the first application hands it to the request, and
/// any further application of the same option records a request-build error.
/// In particular, a [`Session`](crate::Session) default carrying a raw body
/// fails loudly on its second call rather than silently sending nothing.
pub fn body(body: impl Into<reqwest::Body>) -> Opt {
    let slot = Arc::new(Mutex::new(Some(body.into())));
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        match slot.lock().take() {
            Some(body) => req.body = Some(body),
            None => {
                req.err = Some(Error::Request(
                    "raw body already consumed; body options are single-use".to_string(),
                ))
            }
        }
    })
}

/// Append cookies to the request, sent in append order via the `Cookie`
/// header.
pub fn cookies<I, K, V>(pairs: I) -> Opt
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Opt::new(move |req| {
        req.cookies.extend(pairs.iter().cloned());
    })
}

/// Route all connections for this call through the given proxy.
///
/// A malformed proxy URL records a request-build error; the call is rejected
/// before any network I/O.
pub fn proxy(url: impl Into<String>) -> Opt {
    let raw = url.into();
    Opt::new(move |req| {
        if req.err.is_some() {
            return;
        }
        match Url::parse(&raw) {
            Ok(url) => req.proxy = Some(url),
            Err(e) => {
                req.err = Some(Error::Request(format!("invalid proxy url {:?}: {}", raw, e)))
            }
        }
    })
}

/// Cap how many redirects are followed for this call.
///
/// `redirect(0)` follows none: a redirect response is surfaced as-is (and,
/// being 3xx, reported as a status error). `redirect(n)` follows at most `n`
/// hops and surfaces the first unfollowed redirect response. Without this
/// option the transport's default redirect policy applies.
pub fn redirect(max: usize) -> Opt {
    Opt::new(move |req| {
        req.redirect_max = Some(max);
    })
}
