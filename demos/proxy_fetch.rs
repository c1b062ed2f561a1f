//! Proxy fetch example - forwards a body to an upstream while streaming it.
//!
//! Run with: cargo run --example proxy_fetch

use async_trait::async_trait;
use edge_sdk::{
    EdgeClient, HttpError, HttpFetch, HttpMethod, MemoryHost, ReadStream, Upstream,
    UpstreamReply,
};

/// Upstream that counts the bytes it receives.
struct Counter;

#[async_trait]
impl Upstream for Counter {
    async fn handle(&self, request: HttpFetch, mut body: ReadStream) -> Result<UpstreamReply, HttpError> {
        let bytes = body.read_all().await.map_err(|_| HttpError::FetchRequestFailed)?;
        let _ = body.close().await;
        let mut reply = UpstreamReply::new(200, format!("{} {} -> {} bytes", request.method, request.uri, bytes.len()));
        reply.headers.set("content-type", "text/plain");
        Ok(reply)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = MemoryHost::builder().upstream(Counter).build();
    let client = EdgeClient::new(host.shared(), None);

    println!("=== Complete body ===");
    let mut request = HttpFetch::new("https://origin.example/ingest", HttpMethod::Post);
    request.set_header("content-type", "application/json");
    let (mut body, mut pending) = client.fetch_streaming(&request).await?;
    body.write_chunk(r#"{"id":1,"#).await?;
    body.write_chunk(r#""ok":true}"#).await?;
    body.close().await?;
    let response = pending.get_response().await?;
    println!("{}: {}", response.status(), String::from_utf8_lossy(&response.into_bytes().await?));

    println!("=== Aborted body ===");
    let (mut body, mut pending) = client.fetch_streaming(&request).await?;
    body.write_chunk("partial").await?;
    body.abort().await?;
    match pending.get_response().await {
        Ok(response) => println!("unexpected {}", response.status()),
        Err(e) => println!("fetch failed: {e}"),
    }
    Ok(())
}
