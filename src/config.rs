use anyhow::{Context, Result};
use clap::Parser;
use std::{env, str::FromStr};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "ShareIt item lending API")]
pub struct Args {
    /// Host to bind to (overrides SHAREIT_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides SHAREIT_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides SHAREIT_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// SQLite pool size (overrides SHAREIT_DB_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Apply the schema and exit
    #[arg(long)]
    pub migrate: bool,
}

/// Read and parse `name`, falling back to `default` when it is unset.
fn env_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        Self::merge(Args::parse())
    }

    fn merge(args: Args) -> Result<(Self, bool)> {
        // --- Environment fallback ---
        let env_host = env::var("SHAREIT_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = env_parsed("SHAREIT_PORT", 9090u16)?;
        let env_db = env::var("SHAREIT_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/shareit.db".into());
        let env_max = env_parsed("SHAREIT_DB_MAX_CONNECTIONS", 5u32)?;

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            max_connections: args.max_connections.unwrap_or(env_max).max(1),
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let args = Args::parse_from([
            "shareit",
            "--host",
            "127.0.0.1",
            "--port",
            "8081",
            "--database-url",
            "sqlite::memory:",
            "--max-connections",
            "2",
            "--migrate",
        ]);
        let (cfg, migrate) = AppConfig::merge(args).expect("config");

        assert!(migrate);
        assert_eq!(cfg.addr(), "127.0.0.1:8081");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.max_connections, 2);
    }
}
