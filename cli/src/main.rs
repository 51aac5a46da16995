//! Storefront catalog CLI
//!
//! ```sh
//! # Serve with default config (~/.config/storefront-catalog/config.toml)
//! catalog-service
//!
//! # Replace the stored catalog from a JSON seed file
//! catalog-service seed --data data/catalog.json
//!
//! # Validate config without starting
//! catalog-service --config /etc/catalog/config.toml check
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use storefront_catalog::config::AppConfig;
use storefront_catalog::server::{init_tracing, seed_catalog, ServerHandle, ServerOptions};

/// Catalog API serving categories and products as HAL resources.
#[derive(Parser, Debug)]
#[command(name = "catalog-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CATALOG_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Clear the catalog and load it from a JSON seed file.
    Seed {
        /// Seed file; defaults to `seed.data_path` from the config.
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Validate the configuration and exit.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(storefront_catalog::default_config_path);

    let loaded = match AppConfig::load(&config_path) {
        Ok(cfg) => Ok(cfg),
        Err(e) if matches!(cli.command, Some(Command::Check)) => {
            eprintln!("Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e),
    };
    let mut config = loaded.as_ref().cloned().unwrap_or_default();

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    run(cli.command, config, &config_path).await
}

/// Execute `command` (default `serve`) against an already loaded config.
async fn run(
    command: Option<Command>,
    config: AppConfig,
    config_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match command.unwrap_or(Command::Serve { no_migrate: false }) {
        Command::Check => {
            if let Err(e) = config.validate() {
                eprintln!("Configuration is invalid: {}", e);
                std::process::exit(1);
            }
            println!("Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   API address : {}", config.server.address());
            println!("   Public URL  : {}", config.server.public_url);
            println!("   Database    : {:?}", config.database.driver);
            println!("   Log level   : {}", config.logging.level);
            Ok(())
        }
        Command::Seed { data } => {
            let data_path = data.unwrap_or_else(|| config.seed.data_path.clone());
            let report = seed_catalog(&config, &data_path).await?;
            println!(
                "Seeded {} categories, {} products ({} links, {} highlights)",
                report.categories, report.products, report.links, report.highlights
            );
            Ok(())
        }
        Command::Serve { no_migrate } => {
            if let Err(e) = config.validate() {
                error!("Refusing to start with invalid configuration: {}", e);
                return Err(e.into());
            }

            let handle = ServerHandle::start(ServerOptions {
                config,
                auto_migrate: !no_migrate,
            })
            .await?;

            handle.install_signal_handler();
            info!("Press Ctrl+C to shutdown gracefully.");

            handle.shutdown_signal().wait().await;
            handle.wait().await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.pool.min_connections = 20;
        config.database.pool.max_connections = 2;
        config
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["catalog-service", "--port", "8080"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.port, Some(8080));

        let cli = Cli::try_parse_from(["catalog-service", "serve", "--no-migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve { no_migrate: true })));
    }

    #[tokio::test]
    async fn serve_rejects_invalid_config() {
        let path = PathBuf::from("config.toml");

        let err = run(None, invalid_config(), &path).await.unwrap_err();
        assert!(err.to_string().contains("min_connections"));

        let err = run(
            Some(Command::Serve { no_migrate: true }),
            invalid_config(),
            &path,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
