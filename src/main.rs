use estate_scout::config::Config;
use estate_scout::search::{ListingsClient, ListingsController, SearchExecutor, SearchState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Estate Scout - Listings Search");
    info!("=================================");

    let config = Config::from_env()?;
    let query = std::env::args().nth(1).unwrap_or_default();

    let client = ListingsClient::new(&config)?;
    let executor = Arc::new(SearchExecutor::new(Arc::new(client), config.search_timeout));

    info!("Searching {} with query {:?}", config.api_url, query);
    let (controller, initial) = ListingsController::mount(&query, executor);
    initial.run().await;

    match controller.state() {
        SearchState::Ready(properties) if properties.is_empty() => {
            println!("No properties found for {:?}", controller.address_bar());
        }
        SearchState::Ready(properties) => {
            info!("✅ Found {} properties\n", properties.len());
            for (i, property) in properties.iter().enumerate() {
                println!("{}. {} ({})", i + 1, property.title, property.price);
                println!(
                    "   {} · {}",
                    property
                        .property_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    property
                        .status
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
                if let (Some(bedrooms), Some(bathrooms)) = (property.bedrooms, property.bathrooms) {
                    println!("   {} bd, {} ba", bedrooms, bathrooms);
                }
                if let Some(units) = property.units_left() {
                    println!("   Units left: {}", units);
                }
                println!(
                    "   Location: {}, {}",
                    property.location.address, property.location.city
                );
                println!("   ID: {}", property.id);
                println!();
            }
        }
        SearchState::Errored { reason } => {
            warn!("Search failed: {}", reason);
            anyhow::bail!("listings search failed: {}", reason);
        }
        SearchState::Uninitialized | SearchState::Loading => {
            warn!("Search did not complete");
        }
    }

    controller.unmount();
    Ok(())
}
