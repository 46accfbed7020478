//! CLI administration tool for weather-gateway.
//!
//! Inspects and maintains the Redis cache without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the cache key a request maps to
//! cargo run --bin admin -- key forecast "Hanoi" --start 2024-06-16 --end 2024-06-20
//!
//! # Inspect or drop a cached response
//! cargo run --bin admin -- cache get forecast "hanoi:2024-06-16:2024-06-20"
//! cargo run --bin admin -- cache evict current "hanoi:today"
//!
//! # Drop a whole class
//! cargo run --bin admin -- cache clear historical
//!
//! # Check Redis connection
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB` (required for
//!   `cache` and `ping`)

use weather_gateway::config::{Config, mask_connection_string};
use weather_gateway::domain::cache_key::derive_key;
use weather_gateway::domain::entities::{DateBounds, WeatherQuery};
use weather_gateway::infrastructure::cache::{CacheClass, CacheStore, RedisCache};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing weather-gateway.
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
    /// Print the cache class and key for a query
    Key {
        kind: KindArg,

        location: String,

        /// Start date (yyyy-MM-dd), forecast and historical only
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (yyyy-MM-dd), forecast and historical only
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Inspect and maintain cached responses
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Check Redis connection
    Ping,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Current,
    Forecast,
    Historical,
}

/// Cache maintenance subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Show a cached response
    Get {
        /// current, forecast or historical
        class: CacheClass,
        key: String,
    },

    /// Remove one cached response
    Evict { class: CacheClass, key: String },

    /// Remove every cached response of a class
    Clear {
        class: CacheClass,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Key {
            kind,
            location,
            start,
            end,
        } => print_key(kind, location, start, end),
        Commands::Cache { action } => {
            let cache = connect().await?;
            handle_cache_action(action, &cache).await
        }
        Commands::Ping => ping().await,
    }
}

async fn connect() -> Result<RedisCache> {
    let url = Config::load_redis_url().context("REDIS_URL or REDIS_HOST must be set")?;

    RedisCache::connect(&url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&url)))
}

fn print_key(
    kind: KindArg,
    location: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let dates = DateBounds { start, end };
    let query = match kind {
        KindArg::Current => WeatherQuery::current(location),
        KindArg::Forecast => WeatherQuery::Forecast { location, dates },
        KindArg::Historical => WeatherQuery::Historical { location, dates },
    };

    if !matches!(kind, KindArg::Current) && dates.both().is_none() {
        anyhow::bail!("--start and --end are required for dated queries");
    }

    let class = CacheClass::from(query.kind());
    let key = derive_key(&query);

    println!("  Class: {}", class.as_str().cyan());
    println!("  Key:   {}", key.as_str().bright_yellow());
    println!("  Redis: {}", format!("{}::{}", class, key).bright_black());

    Ok(())
}

/// Dispatches cache maintenance commands.
async fn handle_cache_action(action: CacheAction, cache: &RedisCache) -> Result<()> {
    match action {
        CacheAction::Get { class, key } => {
            let entry = cache
                .get(class, &key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read cache: {}", e))?;

            match entry {
                Some(entry) => {
                    let weather = entry.into_weather();
                    println!("{}", "📦 Cached response".bright_blue().bold());
                    println!("  Address: {}", weather.resolved_address.cyan());
                    println!("  Days:    {}", weather.days.len());
                    println!("  Alerts:  {}", weather.alerts.len());
                    println!();
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                }
                None => println!("{}", format!("  No entry for {}::{}", class, key).yellow()),
            }
        }
        CacheAction::Evict { class, key } => {
            cache
                .evict(class, &key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to evict: {}", e))?;
            println!("{}", format!("✅ Evicted {}::{}", class, key).green());
        }
        CacheAction::Clear { class, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove every entry in {}?", class))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            cache
                .clear(class)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to clear {}: {}", class, e))?;
            println!("{}", format!("✅ Cleared {}", class).green().bold());
        }
    }

    Ok(())
}

/// Verifies Redis connectivity.
async fn ping() -> Result<()> {
    println!("{}", "🔍 Checking Redis connection...".bright_blue());

    let cache = connect().await?;
    if cache.health_check().await {
        println!("{}", "✅ Redis connection OK".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Redis did not answer PING")
    }
}
