//! Storyreel CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use storyreel::cli::{commands, Cli, Commands};
use storyreel::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("storyreel={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Fetch { url, json } => {
            commands::run_fetch(url, *json, settings).await?;
        }

        Commands::Generate {
            url,
            duration,
            style,
            output,
            title,
        } => {
            commands::run_generate(
                url,
                *duration,
                style.as_deref(),
                output.clone(),
                title.clone(),
                settings,
            )
            .await?;
        }

        Commands::Edit { file, action } => {
            commands::run_edit(file, action, settings)?;
        }

        Commands::Narrate {
            file,
            voice,
            speed,
            output,
        } => {
            commands::run_narrate(file, voice.as_deref(), *speed, output.clone(), settings).await?;
        }

        Commands::Export {
            file,
            format,
            output,
        } => {
            commands::run_export(file, format, output.clone())?;
        }

        Commands::Projects { action } => {
            commands::run_projects(action, settings).await?;
        }

        Commands::Templates => {
            commands::run_templates()?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
