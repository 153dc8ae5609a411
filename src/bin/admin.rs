//! CLI administration tool for short-keys.
//!
//! Inspects and maintains the persistent key store without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show how many keys are assigned
//! cargo run --bin admin -- stats
//!
//! # Look up the long URL behind a key
//! cargo run --bin admin -- resolve abcdef
//!
//! # Remove a mapping (asks for confirmation unless -y is given)
//! cargo run --bin admin -- delete abcdef
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components, required): PostgreSQL connection string
//! - `REDIS_URL` (optional): deleted keys are also evicted from Redis
//!
//! A running server's in-memory cache cannot be reached from here; deleted
//! keys stay resolvable there until the server restarts.

use short_keys::application::services::{DynShortenerService, ShortenerService};
use short_keys::config::Config;
use short_keys::domain::repositories::KeyStore;
use short_keys::error::AppError;
use short_keys::server::{build_cache, connect_pg_store};
use short_keys::utils::key_generator::{KeyGenerator, RandomKeyGenerator};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing short-keys.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Print the long URL a short key maps to
    Resolve {
        /// Short key, e.g. "abcdef"
        key: String,
    },

    /// Delete a short key mapping
    Delete {
        /// Short key to delete
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let store: Arc<dyn KeyStore> = Arc::new(connect_pg_store(&config, &database_url).await?);
    let cache = build_cache(&config).await;
    let generator: Arc<dyn KeyGenerator> = Arc::new(RandomKeyGenerator::new());
    let service: DynShortenerService = ShortenerService::new(store, generator, cache);

    match cli.command {
        Commands::Stats => handle_stats(&service).await?,
        Commands::Resolve { key } => handle_resolve(&service, &key).await?,
        Commands::Delete { key, yes } => handle_delete(&service, &key, yes).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Displays the number of assigned keys.
async fn handle_stats(service: &DynShortenerService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count keys: {}", e))?;

    println!(
        "  Assigned keys: {}",
        count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints the long URL behind `key`.
async fn handle_resolve(service: &DynShortenerService, key: &str) -> Result<()> {
    match service.resolve(key).await {
        Ok(long_url) => {
            println!("  {} → {}", key.cyan(), long_url.bright_white());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  Key '{}' not found", key).yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve key: {}", e)),
    }
}

/// Deletes the mapping for `key` after confirmation.
///
/// # Safety
///
/// - Shows the current target before asking
/// - Requires confirmation (default: No) unless `--yes` is passed
async fn handle_delete(service: &DynShortenerService, key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Key".bright_blue().bold());
    println!();

    let long_url = match service.resolve(key).await {
        Ok(url) => url,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  Key '{}' not found", key).yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Key:    {}", key.cyan());
    println!("  Target: {}", long_url.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this key?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete key: {}", e))?;

    println!();
    println!("{}", "✅ Key deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
///
/// Connecting already applied pending migrations, so a successful count
/// means both the connection and the `url_entries` table are usable.
async fn handle_db_action(action: DbAction, service: &DynShortenerService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
