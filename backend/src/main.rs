use std::sync::Arc;

use rela::{
    AppState,
    config::StoreBackend,
    database::{DocumentStore, MemoryStore, PgStore},
    load_config, routes,
    workers::orphan_cleanup_worker,
};
use tokio::{net::TcpListener, sync::broadcast};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rela=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    tracing::info!("Loaded configuration:\n{}", config);

    let store: Arc<dyn DocumentStore> = match config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database).await?;
            store.migrate().await?;
            tracing::info!(host = %config.database.host, "Connected to Postgres");
            Arc::new(store)
        }
    };

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let cleanup_interval = config.workers.orphan_cleanup_interval_seconds;
    let worker = (cleanup_interval > 0).then(|| {
        tokio::spawn(orphan_cleanup_worker(
            store.clone(),
            cleanup_interval,
            shutdown_tx.subscribe(),
        ))
    });

    let bind_address = config.server.bind_address();
    let app = routes::app(AppState::new(config, store));

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Rela listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    let _ = shutdown_tx.send(());
    if let Some(worker) = worker {
        let _ = worker.await;
    }

    tracing::info!("Server stopped");
    Ok(())
}
