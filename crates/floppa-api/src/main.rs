//! floppa-api - serves random animal images over HTTP.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use floppa_api::{AnimalRegistry, AppState, GatewayConfig, VERSION, build_router, serve};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let (mut config, path) =
        GatewayConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    match &path {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => warn!("No config file found, using defaults"),
    }

    if let Some(url) = cli.pocketbase_url {
        config.pocketbase_url = Some(url);
    }
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    let registry = AnimalRegistry::from_config(&config).context("invalid configuration")?;
    for animal in registry.iter() {
        info!(
            endpoint = %animal.info.endpoint,
            source = animal.source.as_image_source().name(),
            remote = animal.source.as_pocketbase().is_some(),
            "Serving animal"
        );
    }

    let state = AppState::new(registry, config.request_timeout());
    let router = build_router(state, &config.frontend_dir);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!(version = VERSION, "Starting floppa-api");
    serve(listener, router).await.context("server error")
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
