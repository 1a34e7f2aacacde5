use pokedraft::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND: &str = "127.0.0.1:8080";

// ---------------------------------------------------------------------------
// Server bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("POKEDRAFT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    // Debug set (#1..#9) plus the six stock presets.
    let catalog = MemoryCatalog::seeded();

    let server = PokedraftServerBuilder::new()
        .bind(&bind)
        .build(catalog)
        .await?;

    tracing::info!(addr = %server.local_addr()?, "draft server ready");
    server.run().await?;
    Ok(())
}
