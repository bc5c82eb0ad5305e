//! End-to-end tests against a local mock HTTP server.
//!
//! Unit tests for option folding and URL composition live next to their
//! modules; everything here exercises the full dispatch path on the wire.

mod redirects;
mod session;
