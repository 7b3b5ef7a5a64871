use anyhow::Result;
use std::time::Duration;
use trellis::{Client, ClientConfig, DiscoveryOutcome, Server};

fn join(servers: &[Server]) -> String {
    servers
        .iter()
        .map(Server::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run discovery repeatedly, printing the pool after every run
///
/// Drives discovery from the foreground so each outcome can be reported;
/// stops on Ctrl-C or after `count` runs.
pub async fn run_watch(
    mut config: ClientConfig,
    interval: u64,
    count: Option<usize>,
) -> Result<()> {
    if interval == 0 {
        anyhow::bail!("--interval must be at least 1 second");
    }
    config.discovery.enabled = false;
    let client = Client::new(config)?;

    println!("Bootstrap: {}", join(client.pool().bootstrap()));

    let mut runs = 0usize;
    loop {
        let outcome = client.discover().await;
        runs += 1;

        let detail = match &outcome {
            DiscoveryOutcome::Applied(found) => format!("{} node(s) discovered", found.len()),
            DiscoveryOutcome::Unchanged => "no usable addresses, pool kept".to_string(),
            DiscoveryOutcome::Evicted(server) => format!("evicted {}", server),
            DiscoveryOutcome::Bootstrap => "reverted to bootstrap".to_string(),
            DiscoveryOutcome::ClientGone => break,
        };
        println!(
            "[{:>4}] {:<10} {:<32} pool: {}",
            runs,
            outcome.as_str(),
            detail,
            join(&client.servers())
        );

        if count.is_some_and(|c| runs >= c) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    client.shutdown().await;
    Ok(())
}
