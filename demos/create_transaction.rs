// Reads `config.toml` from the working directory (see `demos/config.example.toml`).
// Any key can be overridden with a `GENIE_` prefixed environment variable.

use anyhow::Context;
use geniebiz_connect::{pagination, GenieClient, Mode};
use serde_json::json;

#[derive(serde::Deserialize, Debug)]
struct Config {
    api_key: String,
    application_id: String,
    #[serde(default)]
    mode: Mode,
    redirect_url: String,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config"))
            .add_source(config::Environment::with_prefix("GENIE"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    // Setup Genie client
    let genie = GenieClient::new(config.api_key, config.application_id, config.mode)?;
    tracing::info!("Using {} environment at {}", genie.mode(), genie.base_url());

    // Create a new transaction
    let payload = json!({
        "amount": 1000,
        "currency": "LKR",
        "redirectUrl": config.redirect_url,
    });
    let res = genie
        .transactions
        .create(
            payload
                .as_object()
                .cloned()
                .context("Payload must be a JSON object")?,
        )
        .await?;

    tracing::info!("Created new transaction: {}", res);

    // List the first page of transactions
    let transactions = genie.transactions.list(&pagination::page(1)).await?;
    tracing::info!("{:#}", transactions);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
