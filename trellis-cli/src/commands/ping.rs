use anyhow::Result;
use std::time::Instant;
use trellis::{Client, ClientConfig, Ping};

/// Ping the cluster and print the answering node
pub async fn run_ping(config: ClientConfig) -> Result<()> {
    let client = Client::new(config)?;

    let start = Instant::now();
    let result = client.execute(&Ping).await?;
    let elapsed = start.elapsed();

    super::ensure_succeeded(&result)?;

    let field = |path: &[&str]| {
        result
            .json_at(path)
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string()
    };

    println!("Node:     {}", field(&["name"]));
    println!("Cluster:  {}", field(&["cluster_name"]));
    println!("Version:  {}", field(&["version", "number"]));
    println!("Latency:  {:.1} ms", elapsed.as_secs_f64() * 1000.0);

    client.shutdown().await;
    Ok(())
}
