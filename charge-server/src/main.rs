use std::sync::Arc;

use charge_server::config::ServerConfig;
use charge_server::recommend::Recommender;
use charge_server::routing::{EnricherConfig, RouteDistanceEnricher, RoutingClient};
use charge_server::store::{CachedStationStore, JsonStationStore};
use charge_server::web::{AppState, cors_layer, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "charge_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load the catalog (fail fast if unavailable)
    let catalog =
        JsonStationStore::load(&config.catalog_path).expect("Failed to load station catalog");
    info!(
        stations = catalog.len().await,
        path = %config.catalog_path.display(),
        "loaded station catalog"
    );

    let store = CachedStationStore::new(catalog, &config.cache_config());
    let mut recommender = Recommender::new(store, config.recommend_config());

    match &config.routing {
        Some(routing) => {
            let client =
                RoutingClient::new(routing.clone()).expect("Failed to create routing client");
            let enricher = RouteDistanceEnricher::new(client, EnricherConfig::default());
            info!(
                max_concurrent = enricher.config().max_concurrent,
                min_interval_ms = enricher.config().min_interval.as_millis() as u64,
                "route distance enrichment enabled"
            );
            recommender = recommender.with_enricher(enricher);
        }
        None => warn!("ROUTING_API_KEY not set; distances are great-circle estimates"),
    }

    let state = AppState::new(recommender);

    // Periodically reload the catalog from disk
    if let Some(period) = config.catalog_refresh {
        let recommender = Arc::clone(&state.recommender);
        let path = config.catalog_path.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                let store = recommender.store();
                match store.inner().reload(&path).await {
                    Ok(count) => {
                        store.invalidate_all();
                        info!(stations = count, "reloaded station catalog");
                    }
                    Err(e) => error!(error = %e, "failed to reload station catalog"),
                }
            }
        });
    }

    let app = create_router(state, cors_layer(config.cors_origin.clone()));

    info!(addr = %config.bind_addr, "charging station recommender listening");
    info!("  GET  /health                  - Health check");
    info!("  POST /api/stations/recommend  - Recommend stations");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
