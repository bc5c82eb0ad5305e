//! Session usage: defaults applied to every call, overridden per call.
//!
//! Run with: cargo run --example session

use reqkit::{header, query, timeout, Session};
use std::time::Duration;

#[tokio::main]
async fn main() -> reqkit::Result<()> {
    tracing_subscriber::fmt::init();

    println!("Reqkit Session Example");
    println!("======================\n");

    let session = Session::new(vec![
        header("X-Api-Key", "default-key"),
        timeout(Duration::from_secs(10)),
    ]);

    let resp = session.get("https://httpbin.org/get", &[]).await?;
    println!("with defaults: {}", resp.status_code());

    // The per-call header wins over the session default for the same key.
    let resp = session
        .get(
            "https://httpbin.org/get",
            &[header("X-Api-Key", "per-call-key"), query([("q", "rust")])],
        )
        .await?;
    println!("with override: {}", resp.status_code());
    println!("{}", resp.text().await?);

    Ok(())
}
