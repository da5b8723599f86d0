mod agent;
mod collector;
mod config;
mod error;
mod es;
mod models;
mod publisher;
mod scheduler;
mod shaper;
mod templates;
mod utils;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent::Agent;
use collector::Collector;
use config::Args;
use error::AgentError;
use es::EsClient;
use publisher::Publisher;
use scheduler::Scheduler;

#[tokio::main]
async fn main() {
    // Inicializuj logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "es_metrics_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI argumenty / env
    let args = Args::parse();

    if let Err(e) = run(args).await {
        match e.downcast_ref::<AgentError>().and_then(AgentError::status) {
            Some(status) => tracing::error!("Fatal error (HTTP {}): {:#}", status, e),
            None => tracing::error!("Fatal error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    tracing::info!("Starting Elasticsearch metrics agent...");

    let source = EsClient::new(&args.cluster_url, args.request_timeout())?;
    let destination = EsClient::new(&args.monitoring_cluster_url, args.request_timeout())?;

    // UUID se zjistí jednou a drží se po celý běh
    let cluster_uuid = collector::discover_cluster_uuid(&source).await?;

    let once = args.once;
    let templates_dir = args.templates_dir.clone();
    let config = args.into_process_config(cluster_uuid);
    tracing::info!(
        "Collecting from {} into {} (index prefix '{}', every {:?})",
        config.source_url,
        config.monitoring_url,
        config.index_prefix,
        config.interval
    );

    // Templaty musí existovat dřív, než se začne zapisovat
    let templates = templates::load_templates(&templates_dir)?;
    templates::provision_templates(&destination, &templates, &config.index_prefix).await?;

    let agent = Agent::new(
        Collector::new(source, config.cluster_uuid.clone()),
        Publisher::new(destination),
        config.index_prefix.clone(),
    );

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    let mut scheduler = Scheduler::new(config.interval);
    let cycles = agent.run(&mut scheduler, &cancel, once).await?;

    if cancel.is_cancelled() {
        tracing::info!("Interrupted after {} cycles", cycles);
    } else {
        tracing::info!("Finished after {} cycles", cycles);
    }
    tracing::debug!("Scheduler state: {:?}", scheduler.state());
    Ok(())
}

/// Čeká na CTRL+C nebo SIGTERM a zruší token
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received CTRL+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    cancel.cancel();
}
