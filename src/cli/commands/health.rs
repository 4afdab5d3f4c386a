use anyhow::anyhow;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_json;
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (healthy, body) = client.health().await?;

    match output_format {
        OutputFormat::Json => output_json(&body)?,
        OutputFormat::Text => {
            let status = body["data"]["status"].as_str().unwrap_or("unknown");
            println!("{}: {}", client.base_url(), status);
        }
    }

    if !healthy {
        return Err(anyhow!("server at {} is not healthy", client.base_url()));
    }
    Ok(())
}
