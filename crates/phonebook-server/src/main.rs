//! Phonebook Server - Main entry point

use anyhow::Result;
use phonebook_common::logging::{init_logging, LogConfig};
use tracing::info;

use phonebook_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("phonebook-server")
        .filter_directives("phonebook_server=debug,tower_http=debug,sqlx=info")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting phonebook server");

    let config = Config::load()?;
    info!(
        backend = %config.store.backend,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
