use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use dracor_core::client::DEFAULT_API_BASE_URL;

const DEFAULT_EXISTDB_ADMIN: &str = "admin";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:9000";

#[derive(Parser, Debug)]
#[command(name = "dracor-mcpd", version, about = "DraCor MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "DRACOR_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "DRACOR_EXISTDB_ADMIN", default_value = DEFAULT_EXISTDB_ADMIN)]
    existdb_admin: String,

    #[arg(long, env = "DRACOR_EXISTDB_PWD", default_value = "", hide_env_values = true)]
    existdb_pwd: String,

    #[arg(
        long,
        env = "DRACOR_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "DRACOR_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "DRACOR_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct DracorConfig {
    pub api_base_url: String,
    pub existdb_admin: String,
    pub existdb_pwd: String,
    pub timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl DracorConfig {
    /// Parses configuration from the process arguments and environment.
    ///
    /// # Errors
    /// Returns `ConfigError` when a setting fails validation.
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for DracorConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "DRACOR_API_BASE_URL",
                value: args.api_base_url,
            });
        }

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "DRACOR_TIMEOUT_SECS",
                value: args.timeout_secs.to_string(),
            });
        }

        Ok(Self {
            api_base_url: args.api_base_url,
            existdb_admin: args.existdb_admin,
            existdb_pwd: args.existdb_pwd,
            timeout: Duration::from_secs(args.timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            existdb_admin: DEFAULT_EXISTDB_ADMIN.to_string(),
            existdb_pwd: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_stdio: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
        }
    }

    #[test]
    fn defaults_parse() {
        let config = DracorConfig::try_from(base_args()).expect("config should parse");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.existdb_admin, "admin");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(!config.enable_stdio);
    }

    #[test]
    fn rejects_empty_base_url() {
        let mut args = base_args();
        args.api_base_url = "   ".to_string();
        assert!(DracorConfig::try_from(args).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut args = base_args();
        args.timeout_secs = 0;
        assert!(DracorConfig::try_from(args).is_err());
    }
}
