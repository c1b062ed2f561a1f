//! Relay example - streams the client request body straight into the response.
//!
//! Run with: cargo run --example relay

use edge_sdk::{EdgeClient, HttpMethod, HttpRequest, HttpResponse, MemoryHost};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,edge_sdk=debug")),
        )
        .init();

    let request = HttpRequest::new(HttpMethod::Post, "https://edge.example/relay");
    let host = MemoryHost::builder()
        .client_request(request, "hello from the client")
        .build();
    let client = EdgeClient::new(host.shared(), None);

    let head = client.request().await?;
    println!("{} {}", head.method(), head.uri());

    let mut response = HttpResponse::new();
    response.set_header("content-type", "application/octet-stream");

    let source = client.open_request_stream().await?;
    let target = client.send_response_streaming(&response).await?;
    let relayed = source.pipe_to(target).await?;
    println!("relayed {relayed} bytes");

    if let Some(recorded) = host.client_response().await {
        println!(
            "client got {} ({}): {:?}",
            recorded.head.status,
            if recorded.is_complete() { "complete" } else { "incomplete" },
            recorded.body
        );
    }
    Ok(())
}
