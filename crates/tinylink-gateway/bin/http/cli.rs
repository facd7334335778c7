use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;
use tinylink_registry::DEFAULT_MAX_ATTEMPTS;
use tinylink_telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "TINYLINK_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "TINYLINK_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "TINYLINK_DATABASE_URL";
pub const DB_MAX_CONNECTIONS_ENV: &str = "TINYLINK_DB_MAX_CONNECTIONS";
pub const DB_TIMEOUT_MS_ENV: &str = "TINYLINK_DB_TIMEOUT_MS";
pub const GENERATOR_ENV: &str = "TINYLINK_GENERATOR";
pub const GENERATOR_PREFIX_ENV: &str = "TINYLINK_GENERATOR_PREFIX";
pub const GENERATOR_OFFSET_ENV: &str = "TINYLINK_GENERATOR_OFFSET";
pub const MAX_ATTEMPTS_ENV: &str = "TINYLINK_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GENERATOR_PREFIX: &str = "tl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "random")]
    Random,
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink", version, about = "TinyLink URL shortener HTTP server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATABASE_URL_ENV, required_if_eq("storage", "postgres"))]
    pub database_url: Option<String>,

    #[arg(long, env = DB_MAX_CONNECTIONS_ENV, default_value_t = 10)]
    pub db_max_connections: u32,

    #[arg(long, env = DB_TIMEOUT_MS_ENV, default_value_t = 5_000)]
    pub db_timeout_ms: u64,

    #[arg(long, env = GENERATOR_ENV, value_enum, default_value_t = GeneratorArg::Random)]
    pub generator: GeneratorArg,

    #[arg(long, env = GENERATOR_PREFIX_ENV, default_value = DEFAULT_GENERATOR_PREFIX)]
    pub generator_prefix: String,

    /// First counter value of the seq generator. When unset, the counter
    /// continues after the highest matching code already in the store.
    #[arg(long, env = GENERATOR_OFFSET_ENV)]
    pub generator_offset: Option<u64>,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["tinylink"]).unwrap();

        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.generator, GeneratorArg::Random);
        assert_eq!(cli.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cli.db_timeout(), Duration::from_secs(5));
        assert_eq!(cli.log_format, LogFormat::Text);
        assert_eq!(cli.generator_offset, None);
    }

    #[test]
    fn explicit_generator_offset() {
        let cli = CLI::try_parse_from([
            "tinylink",
            "--generator",
            "seq",
            "--generator-offset",
            "1000",
        ])
        .unwrap();

        assert_eq!(cli.generator, GeneratorArg::Seq);
        assert_eq!(cli.generator_offset, Some(1000));
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(CLI::try_parse_from(["tinylink", "--storage", "postgres"]).is_err());

        let cli = CLI::try_parse_from([
            "tinylink",
            "--storage",
            "postgres",
            "--database-url",
            "postgres://localhost/tinylink",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::Postgres);
    }

    #[test]
    fn rejects_zero_max_attempts() {
        assert!(CLI::try_parse_from(["tinylink", "--max-attempts", "0"]).is_err());
    }
}
