//! Phonebook CLI - Main entry point

use clap::Parser;
use phonebook_cli::{api::ApiClient, commands, Cli, Commands};
use phonebook_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("phonebook-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> phonebook_cli::Result<()> {
    let client = ApiClient::new(cli.server_url.clone())?;

    match &cli.command {
        Commands::List => commands::entries::list(&client).await,
        Commands::Add { name, number } => {
            commands::entries::add(&client, name.clone(), number.clone()).await
        },
        Commands::Get { id } => commands::entries::get(&client, id.clone()).await,
        Commands::Update { id, name, number } => {
            commands::entries::update(&client, id.clone(), name.clone(), number.clone()).await
        },
        Commands::Delete { id } => commands::entries::delete(&client, id.clone()).await,
        Commands::Info => commands::info::run(&client).await,
    }
}
