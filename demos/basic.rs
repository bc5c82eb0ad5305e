//! Basic usage: a GET with query parameters and a JSON POST.
//!
//! Run with: cargo run --example basic

use reqkit::{get, header, json, post, query, Error};

#[tokio::main]
async fn main() -> reqkit::Result<()> {
    tracing_subscriber::fmt::init();

    println!("Reqkit Basic Example");
    println!("====================\n");

    let resp = get(
        "https://httpbin.org/get",
        &[query([("page", "2")]), header("X-Demo", "basic")],
    )
    .await?;
    println!("GET status: {}", resp.status_code());
    println!("GET body:\n{}\n", resp.text().await?);

    let resp = post(
        "https://httpbin.org/post",
        &[json(&serde_json::json!({"name": "demo", "count": 3}))],
    )
    .await?;
    println!("POST status: {}", resp.status_code());

    // Non-2xx responses arrive inside the error, body intact.
    match get("https://httpbin.org/status/404", &[]).await {
        Err(Error::Status { code, response }) => {
            println!("expected failure: {} ({} bytes)", code, response.bytes().await?.len());
        }
        other => println!("unexpected: {:?}", other.map(|r| r.status_code())),
    }

    Ok(())
}
