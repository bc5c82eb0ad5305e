//! Verb functions and request dispatch.
//!
//! One function per HTTP verb, each taking a target URL and a slice of
//! options. Dispatch folds the options into a request, composes the URL,
//! configures the transport for this call only, issues the call, and
//! classifies any failure into the crate's error taxonomy.
//!
//! # Per-call transport configuration
//!
//! Timeout, proxy, and redirect policy are applied to a client built for the
//! call at hand, never to shared process-wide state. Concurrent calls with
//! different options cannot interfere with each other; the cost is that
//! connection reuse across calls is forfeited.
//!
//! # Failure points, in order
//!
//! 1. An option recorded a configuration error: request-build error, no I/O.
//! 2. The target URL does not parse: request-build error.
//! 3. The transport fails: timeout error if it reports a timeout condition,
//!    network error otherwise.
//! 4. The final status is outside `200..=299`: status error carrying the
//!    response.
//!
//! # Examples
//!
//! ```ignore
//! use reqkit::{get, post, json, query, timeout};
//! use std::time::Duration;
//!
//! let resp = get("http://example.com/search", &[query([("q", "rust")])]).await?;
//!
//! let created = post(
//!     "http://example.com/items",
//!     &[json(&serde_json::json!({"name": "demo"})), timeout(Duration::from_secs(3))],
//! )
//! .await?;
//! ```

use crate::error::{Error, Result};
use crate::options::Opt;
use crate::request::Request;
use crate::response::Response;
use http::header::{HeaderValue, COOKIE};
use http::Method;
use reqwest::redirect;

/// Send a GET request.
pub async fn get(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::GET, target.as_ref(), opts).await
}

/// Send a POST request.
pub async fn post(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::POST, target.as_ref(), opts).await
}

/// Send a PUT request.
pub async fn put(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::PUT, target.as_ref(), opts).await
}

/// Send a PATCH request.
pub async fn patch(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::PATCH, target.as_ref(), opts).await
}

/// Send a DELETE request.
pub async fn delete(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::DELETE, target.as_ref(), opts).await
}

/// Send a HEAD request.
pub async fn head(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::HEAD, target.as_ref(), opts).await
}

/// Send an OPTIONS request.
pub async fn options(target: impl AsRef<str>, opts: &[Opt]) -> Result<Response> {
    dispatch(Method::OPTIONS, target.as_ref(), opts).await
}

pub(crate) async fn dispatch(method: Method, target: &str, opts: &[Opt]) -> Result<Response> {
    let mut req = Request::new(method, target);
    req.apply(opts);
    if let Some(err) = req.err.take() {
        return Err(err);
    }

    let url = req.build_url()?;
    let client = build_client(&req)?;

    tracing::debug!(method = %req.method, url = %url, "dispatching request");

    let mut headers = req.headers.clone();
    if !req.cookies.is_empty() {
        let cookie = cookie_header(&headers, &req.cookies)?;
        headers.insert(COOKIE, cookie);
    }

    let mut builder = client.request(req.method.clone(), url);
    if !headers.is_empty() {
        builder = builder.headers(headers);
    }
    if let Some(body) = req.body.take() {
        builder = builder.body(body);
    }

    let resp = builder.send().await.map_err(classify)?;
    let status = resp.status();
    tracing::debug!(status = status.as_u16(), url = %resp.url(), "response received");

    let wrapped = Response::new(resp);
    if !status.is_success() {
        return Err(Error::Status {
            code: status.as_u16(),
            response: wrapped,
        });
    }
    Ok(wrapped)
}

/// Build the transport for a single call, applying the request's timeout,
/// proxy, redirect cap, and gzip flag.
fn build_client(req: &Request) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().gzip(req.decompress_gzip);

    if let Some(timeout) = req.timeout {
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
    }

    if let Some(proxy_url) = &req.proxy {
        let proxy = reqwest::Proxy::all(proxy_url.clone())
            .map_err(|e| Error::Request(format!("invalid proxy url {:?}: {}", proxy_url.as_str(), e)))?;
        builder = builder.proxy(proxy);
    }

    match req.redirect_max {
        Some(0) => builder = builder.redirect(redirect::Policy::none()),
        Some(max) => {
            // Surfaces the first unfollowed redirect response as-is instead
            // of turning the cap into an error.
            builder = builder.redirect(redirect::Policy::custom(move |attempt| {
                if attempt.previous().len() > max {
                    attempt.stop()
                } else {
                    attempt.follow()
                }
            }));
        }
        None => {}
    }

    builder
        .build()
        .map_err(|e| Error::Request(format!("building http client: {}", e)))
}

/// Join the cookie pairs in append order, after any caller-set `Cookie`
/// header value.
fn cookie_header(headers: &http::HeaderMap, cookies: &[(String, String)]) -> Result<HeaderValue> {
    let mut line = String::new();
    if let Some(existing) = headers.get(COOKIE) {
        let existing = existing
            .to_str()
            .map_err(|e| Error::Request(format!("invalid cookie header: {}", e)))?;
        line.push_str(existing);
    }
    for (name, value) in cookies {
        if !line.is_empty() {
            line.push_str("; ");
        }
        line.push_str(name);
        line.push('=');
        line.push_str(value);
    }
    HeaderValue::from_str(&line).map_err(|e| Error::Request(format!("invalid cookie value: {}", e)))
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err)
    } else {
        Error::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[test]
    fn test_cookie_header_append_order() {
        let headers = HeaderMap::new();
        let cookies = vec![
            ("session".to_string(), "abc".to_string()),
            ("theme".to_string(), "dark".to_string()),
        ];
        let value = cookie_header(&headers, &cookies).unwrap();
        assert_eq!(value, "session=abc; theme=dark");
    }

    #[test]
    fn test_cookie_header_appends_after_existing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("first=1"));
        let cookies = vec![("second".to_string(), "2".to_string())];
        let value = cookie_header(&headers, &cookies).unwrap();
        assert_eq!(value, "first=1; second=2");
    }

    #[test]
    fn test_cookie_header_rejects_invalid_bytes() {
        let headers = HeaderMap::new();
        let cookies = vec![("bad".to_string(), "line\nbreak".to_string())];
        assert!(cookie_header(&headers, &cookies).unwrap_err().is_request());
    }
}
