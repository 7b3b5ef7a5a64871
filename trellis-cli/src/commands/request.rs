use anyhow::{Context, Result};
use trellis::{Client, ClientConfig, RawAction, RestMethod};

/// Send one request and pretty-print the JSON response
pub async fn run_request(
    config: ClientConfig,
    method: &str,
    path: &str,
    body: Option<String>,
) -> Result<()> {
    let method = RestMethod::parse(method)
        .with_context(|| format!("Unsupported HTTP method '{}'", method))?;

    let mut action = RawAction::new(method, path);
    if let Some(body) = body {
        serde_json::from_str::<serde_json::Value>(&body).context("Request body is not valid JSON")?;
        action = action.with_body(body);
    }

    let client = Client::new(config)?;
    let result = client.execute(&action).await?;

    if !result.json().is_null() {
        println!("{}", serde_json::to_string_pretty(result.json())?);
    }
    client.shutdown().await;

    super::ensure_succeeded(&result)
}
