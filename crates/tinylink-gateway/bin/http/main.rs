mod cli;

use crate::cli::{GeneratorArg, StorageBackendArg, CLI};
use clap::Parser;
use std::sync::Arc;
use tinylink_core::{LinkRegistry, LinkStore};
use tinylink_gateway::{App, AppState};
use tinylink_generator::{RandomGenerator, SeqGenerator};
use tinylink_registry::RegistryService;
use tinylink_storage::{InMemoryLinkStore, PostgresLinkStore, PostgresOptions};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let config = CLI::parse();
    tinylink_telemetry::init_tracing(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        generator = %config.generator,
        max_attempts = config.max_attempts,
        "starting tinylink"
    );

    // The store is fully initialised here, before the listener accepts anything.
    let registry = match config.storage {
        StorageBackendArg::InMemory => build_registry(InMemoryLinkStore::new(), &config).await?,
        StorageBackendArg::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("database url is required when storage backend is postgres")?;
            let options = PostgresOptions::builder()
                .max_connections(config.db_max_connections)
                .timeout(config.db_timeout())
                .build();
            let store = PostgresLinkStore::connect(database_url, options).await?;
            store.migrate().await?;
            info!("connected to postgres");
            build_registry(store, &config).await?
        }
    };

    let app = App::router(AppState::new(registry, config.public_base_url.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

async fn build_registry<S: LinkStore>(
    store: S,
    config: &CLI,
) -> Result<Arc<dyn LinkRegistry>, Box<dyn std::error::Error>> {
    let registry: Arc<dyn LinkRegistry> = match config.generator {
        GeneratorArg::Random => Arc::new(
            RegistryService::new(store, RandomGenerator::default())
                .with_max_attempts(config.max_attempts),
        ),
        GeneratorArg::Seq => {
            let generator = seq_generator(&store, config).await?;
            Arc::new(RegistryService::new(store, generator).with_max_attempts(config.max_attempts))
        }
    };
    Ok(registry)
}

/// The counter must not restart at 0 against a populated store.
async fn seq_generator<S: LinkStore>(
    store: &S,
    config: &CLI,
) -> Result<SeqGenerator, Box<dyn std::error::Error>> {
    let prefix = config.generator_prefix.as_str();
    if let Some(offset) = config.generator_offset {
        return Ok(SeqGenerator::with_offset(prefix, offset)?);
    }

    let existing = store.list_all().await?;
    let generator =
        SeqGenerator::resume_after(prefix, existing.iter().map(|link| link.short_code.as_str()))?;
    info!(prefix, links = existing.len(), "seq generator resumed from store");
    Ok(generator)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
