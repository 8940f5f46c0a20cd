//! Trustpoint gateway binary entrypoint.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{anyhow, Context, Result};
use argh::from_env;
use tokio::{net::TcpListener, runtime, signal};
use tracing::{info, warn};
use trustpoint_client::{HttpVerificationClient, VerificationApi};
use trustpoint_common::logging::{self, FileLoggingConfig, LoggerConfig};
use trustpoint_config::{load_config, Config, EnvOverrides};
use trustpoint_gateway::{router, AppState};

use crate::args::Args;

mod args;

fn main() -> Result<()> {
    let args: Args = from_env();

    let config = build_config(&args).map_err(|e| anyhow!("failed to load configuration: {e}"))?;

    init_logging(&config);

    let rt = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("trustpoint-rt")
        .build()
        .context("failed to build runtime")?;

    rt.block_on(run(config))
}

/// File config, then env secrets, then CLI overrides.
fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    EnvOverrides::from_env().apply(&mut config);
    if let Some(host) = &args.host {
        config.gateway.listen_host = host.clone();
    }
    if let Some(port) = args.port {
        config.gateway.listen_port = port;
    }
    Ok(config)
}

fn init_logging(config: &Config) {
    let service_name =
        logging::format_service_name("trustpoint", config.logging.service_label.as_deref());
    let mut logger_config = LoggerConfig::new(service_name)
        .with_json_logging(config.logging.json_format.unwrap_or(false));
    if let Some(log_dir) = &config.logging.log_dir {
        let prefix = config
            .logging
            .log_file_prefix
            .clone()
            .unwrap_or_else(|| "trustpoint".to_owned());
        logger_config =
            logger_config.with_file_logging(FileLoggingConfig::new(log_dir.clone(), prefix));
    }
    logging::init(logger_config);
}

async fn run(config: Config) -> Result<()> {
    // Missing credentials degrade instead of crashing: the gateway keeps
    // serving and every dispatching request fails fast with 500.
    let verifier = match HttpVerificationClient::new(&config.backend) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn VerificationApi>),
        Err(err) => {
            warn!(%err, "verification backend not configured; checkpoint calls will fail");
            None
        }
    };

    let state = AppState::new(verifier, config.gateway.cors_origin.clone());

    let listener = TcpListener::bind((
        config.gateway.listen_host.as_str(),
        config.gateway.listen_port,
    ))
    .await
    .context("failed to bind listen address")?;
    let addr = listener.local_addr().context("failed to read listen address")?;
    info!(%addr, "gateway listening");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("exiting trustpoint");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
