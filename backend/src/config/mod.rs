//! Application configuration management

use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// Costs bcrypt accepts
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn from_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (for logging URLs)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// SQLite connection URL, e.g. `sqlite:bookshelf.db`
    pub database_url: String,

    /// Maximum pooled connections
    pub database_max_connections: u32,

    /// How long startup keeps retrying the database connection
    pub database_connect_timeout: Duration,

    /// bcrypt cost factor for stored passwords
    pub bcrypt_cost: u32,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // DATABASE_URL wins; DATABASE_PATH is a bare file path
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DATABASE_PATH").map(|path| format!("sqlite:{path}")))
            .unwrap_or_else(|| "sqlite:bookshelf.db".to_string());

        Ok(Self {
            host: lookup("HOST"),

            port: lookup("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            database_connect_timeout: Duration::from_secs(
                lookup("DATABASE_CONNECT_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),

            bcrypt_cost: parse_bcrypt_cost(lookup("BCRYPT_COST"))?,

            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::from_value(&v))
                .unwrap_or_default(),
        })
    }
}

fn parse_bcrypt_cost(value: Option<String>) -> Result<u32> {
    let Some(value) = value else {
        return Ok(bcrypt::DEFAULT_COST);
    };
    let cost: u32 = value.trim().parse().context("Invalid BCRYPT_COST")?;
    if !BCRYPT_COST_RANGE.contains(&cost) {
        bail!(
            "Invalid BCRYPT_COST: {cost} is outside {}..={}",
            BCRYPT_COST_RANGE.start(),
            BCRYPT_COST_RANGE.end()
        );
    }
    Ok(cost)
}
