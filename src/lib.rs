#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Design
//!
//! The crate is a thin configuration and dispatch layer over [`reqwest`]; the
//! transport (connection pooling, TLS, framing, redirect mechanics, gzip
//! decompression) is reqwest's. What this crate owns:
//!
//! - **Functional options**: a request is configured by folding an ordered
//!   list of [`Opt`] values over a builder, strictly left to right. Options
//!   never panic; a failing option records the first error in the builder and
//!   dispatch rejects the call before any network I/O.
//! - **URL composition**: builder-supplied query parameters merge additively
//!   with the target's existing query string.
//! - **Per-call transport selection**: timeout, proxy, redirect cap, and the
//!   gzip flag configure a client for that call only, with no shared mutable
//!   state between calls.
//! - **Response materialization**: the body is read at most once and cached;
//!   `bytes`/`text`/`json` all observe the same outcome.
//! - **Sessions**: a fixed default option list prepended to each call's
//!   options, so per-call options override defaults by ordinary fold order.
//! - **Error taxonomy**: request-build, network, timeout, status (carrying
//!   the response), response-read, nil-response, no-content.
//!
//! There is no built-in retry policy and nothing is swallowed: every failure
//! is returned to the direct caller wrapped in its category.
//!
//! ## Module Structure
//!
//! - **[client]** - Verb functions and request dispatch
//! - **[options]** - The [`Opt`] type and option constructors
//! - **[request]** - Request builder and URL composition
//! - **[response]** - Response wrapper and body materialization
//! - **[session]** - Default-option reuse across calls
//! - **[error]** - Error taxonomy and result handling

pub mod client;
pub mod error;
pub mod options;
pub mod request;
pub mod response;
pub mod session;

pub use client::{delete, get, head, options, patch, post, put};
pub use error::{Error, Result};
pub use options::{
    body, cookies, decompress_gzip, form, header, headers, json, proxy, query, redirect, timeout,
    Opt,
};
pub use request::Request;
pub use response::Response;
pub use session::Session;

#[cfg(test)]
mod tests;
