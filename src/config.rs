//! Server configuration from flags and environment.

use std::net::SocketAddr;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Command-line arguments for the showcase server.
#[derive(Debug, Clone, Parser)]
#[command(name = "showcase", version, about = "Setup showcase server")]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "SHOWCASE_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Default log level; `RUST_LOG` directives take precedence.
    #[arg(long = "log-level", env = "SHOWCASE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long = "log-format",
        env = "SHOWCASE_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,

    /// Load the demo setups at startup.
    #[arg(long, env = "SHOWCASE_SEED", default_value_t = true, action = ArgAction::Set)]
    pub seed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub logging: LoggingSettings,
    pub seed: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.to_string(),
        }
    }
}

impl TryFrom<ServeArgs> for Settings {
    type Error = ConfigError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let addr = SocketAddr::from_str(&args.addr).map_err(|e| ConfigError::invalid("addr", e))?;
        let level =
            LevelFilter::from_str(&args.log_level).map_err(|e| ConfigError::invalid("log-level", e))?;

        Ok(Settings {
            addr,
            logging: LoggingSettings {
                level,
                format: args.log_format,
            },
            seed: args.seed,
        })
    }
}
