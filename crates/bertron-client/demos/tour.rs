//! Walk through the BERtron API against a live server.
//!
//! ```sh
//! BERTRON_BASE_URL=http://localhost:8000 cargo run -p bertron-client --example tour
//! ```

use bertron_client::{BertronClient, BertronError};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour=info,bertron_client=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "BERtron tour failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BertronError> {
    let mut client = BertronClient::from_env()?;
    info!(base_url = %client.base_url(), "Connecting to BERtron");

    let health = client.health_check().await?;
    info!(%health, "Server health");

    let all = client.get_all_entities().await?;
    info!(count = all.count, "Fetched all entities");

    if let Some(first) = all.entities.first() {
        let entity = client.get_entity_by_id(&first.id).await?;
        info!(id = %entity.id, name = entity.name.as_deref().unwrap_or("-"), "Fetched entity by ID");
    }

    let emsl = client.find_entities_by_source("EMSL").await?;
    info!(count = emsl.count, "EMSL entities");

    let samples = client.find_entities_by_entity_type("sample").await?;
    info!(count = samples.count, "Sample entities");

    let florida = client.get_entities_in_region(28.1, -81.4, 100.0).await?;
    info!(count = florida.count, "Entities within 100 km of central Florida");

    let yellowstone = client
        .find_entities_in_bounding_box(44.0, -125.0, 49.0, -110.0)
        .await?;
    info!(count = yellowstone.count, "Entities in the Yellowstone region");

    client.close();
    Ok(())
}
