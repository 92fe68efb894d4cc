//! CLI entry point for the finrisk-web search front end.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use finrisk_core::AppConfig;
use finrisk_graph::{GraphClient, GraphConfig};

use finrisk_web::{router, AppState, SearchService};

#[derive(Parser)]
#[command(name = "finrisk-web")]
#[command(about = "Search front end for the financial-risk knowledge graph")]
struct Cli {
    /// Config file prefix (default: finrisk).
    #[arg(short, long, default_value = "finrisk")]
    config: String,

    /// Listen address, e.g. 0.0.0.0:5000 (overrides server.bind).
    #[arg(short, long)]
    bind: Option<String>,

    /// SPARQL query endpoint URL (overrides sparql.endpoint).
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let graph = GraphClient::new(&GraphConfig::from(config.sparql.clone()))?;
    match graph.ping().await {
        Ok(_) => tracing::info!(endpoint = %graph.endpoint(), "SPARQL endpoint reachable"),
        Err(e) => {
            tracing::warn!(endpoint = %graph.endpoint(), error = %e, "SPARQL endpoint not reachable yet")
        }
    }

    let state = Arc::new(AppState {
        search: SearchService::new(graph, config.search.clone()),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down HTTP server");
        })
        .await?;

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.sparql.endpoint = endpoint.clone();
    }
    config.validate()?;
    Ok(config)
}
