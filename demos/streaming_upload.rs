//! Streaming upload example - writes an object chunk by chunk, then reads it back.
//!
//! Run with: cargo run --example streaming_upload

use bytes::Bytes;
use edge_sdk::{EdgeClient, MemoryHost, storage_status_code};
use futures::StreamExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = MemoryHost::new();
    let client = EdgeClient::new(host.shared(), None);

    println!("=== Upload ===");
    let (mut body, mut pending) = client
        .storage_put_streaming("logs", "2026-10-18.txt", "kind=log,retention=7d")
        .await?;
    let lines = futures::stream::iter(
        ["boot\n", "request 1\n", "request 2\n"].map(|l| Bytes::from_static(l.as_bytes())),
    );
    let written = body.send_all(lines).await?;
    body.close().await?;

    let stored = pending.get_response().await;
    println!("status {} after {written} bytes", storage_status_code(&stored));

    println!("=== Download ===");
    let object = client.storage_get_streaming("logs", "2026-10-18.txt").await?;
    if let Some(props) = object.headers().get("x-properties") {
        println!("properties: {props}");
    }
    if let Some(stream) = object.body.into_stream() {
        let mut chunks = stream.into_stream();
        while let Some(chunk) = chunks.next().await {
            print!("{}", String::from_utf8_lossy(&chunk?));
        }
    }

    println!("=== Missing object ===");
    let missing = client.storage_get_streaming("logs", "nope.txt").await;
    println!("status {}", storage_status_code(&missing));
    Ok(())
}
