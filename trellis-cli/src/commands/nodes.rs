use anyhow::Result;
use serde_json::Value;
use trellis::discovery::node_server;
use trellis::{Client, ClientConfig, NodesInfo};

/// List nodes with the address discovery would use for each
pub async fn run_nodes(config: ClientConfig, filter: &str) -> Result<()> {
    let scheme = config.discovery.default_scheme.clone();
    let client = Client::new(config)?;

    let action = NodesInfo::new().add_node(filter).with_http();
    let result = client.execute(&action).await?;
    super::ensure_succeeded(&result)?;

    println!(
        "Cluster: {}",
        result
            .json_at(&["cluster_name"])
            .and_then(|v| v.as_str())
            .unwrap_or("?")
    );
    println!();
    println!("{:<24} {:<24} {:<32}", "ID", "NAME", "HTTP ADDRESS");
    println!("{}", "-".repeat(80));

    if let Some(nodes) = result.json_at(&["nodes"]).and_then(Value::as_object) {
        for (id, node) in nodes {
            let address = node_server(node, &scheme)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());

            println!(
                "{:<24} {:<24} {:<32}",
                id,
                node.get("name").and_then(Value::as_str).unwrap_or("?"),
                address
            );
        }
    }

    client.shutdown().await;
    Ok(())
}
