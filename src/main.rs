mod api;
mod catalog;
mod content;
mod feeds;
mod globe;
mod poll;
mod sequence;
mod tracking;
mod web;

#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::tracking::SystemHealth;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "cryptik-console")]
#[command(about = "Space domain awareness operator console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the console
    Serve {
        /// YAML configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<String>,
    },
    /// Validate a configuration file
    Validate { config: String },
    /// Query the backend once and print the derived health
    Health {
        #[arg(long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Validate { config } => validate(&config),
        Commands::Health { config } => health(config.as_deref()).await,
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match path {
        None => Some(Config::default()),
        Some(path) => match Config::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Error loading {}: {}", path, e);
                None
            }
        },
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(Some(path)) else {
        return ExitCode::FAILURE;
    };
    println!("Configuration is valid");
    println!("  bind:         {}", config.web.bind);
    println!("  backend:      {}", config.api.base_url());
    println!(
        "  tracking:     every {}",
        humantime::format_duration(config.polling.tracking)
    );
    println!(
        "  conjunctions: every {} ({:?} fallback)",
        humantime::format_duration(config.polling.conjunctions),
        config.conjunctions.fallback
    );
    println!("  station:      {}", config.station.name);
    ExitCode::SUCCESS
}

async fn health(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let client = match config.api.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = client.health().await {
        eprintln!("{}: {}", client.base_url(), e);
        println!("{}", SystemHealth::Degraded);
        return ExitCode::FAILURE;
    }
    match client.system_status().await {
        Ok(status) => {
            let health = SystemHealth::from_status(&status);
            println!("{}", health);
            if let Some(active) = status.active_satellites {
                println!("  active satellites: {}", active);
            }
            if health == SystemHealth::Operational {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{}: {}", client.base_url(), e);
            println!("{}", SystemHealth::Degraded);
            ExitCode::FAILURE
        }
    }
}
