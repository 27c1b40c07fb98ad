//! chattyd - a small IRC server.

mod auth;
mod config;
mod error;
mod handlers;
mod network;
mod state;
mod store;
mod teardown;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::state::{spawn_reaper, Service};
use crate::store::CredentialStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse(std::env::args().skip(1));

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if config.debug { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    std::fs::create_dir_all(&config.data_path)?;
    let store = Arc::new(
        CredentialStore::open(&config.data_path.join("chattyd.redb"))
            .map_err(|e| anyhow::anyhow!("failed to open credential store: {e}"))?,
    );

    let service = Arc::new(Service::new(config.server_name.clone(), store));
    spawn_reaper(service.nicks.clone());

    info!(server = %service.server_name, address = %config.address, "starting chattyd");

    network::listener::serve(config, service)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    Ok(())
}
