use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::wire::HEADER_LEN;

/// Runtime settings. Zones and the upstream resolver come from the zone
/// config file; this covers everything else.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Sockets, timeouts and limits
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load settings from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. authdns.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied last.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("authdns.toml").exists() {
            Self::from_file("authdns.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_packet_size < HEADER_LEN {
            return Err(ConfigError::Validation(format!(
                "max_packet_size must be at least {} bytes",
                HEADER_LEN
            )));
        }

        if self.server.max_packet_size > u16::MAX as usize {
            return Err(ConfigError::Validation(
                "max_packet_size cannot exceed 65535 bytes".to_string(),
            ));
        }

        if self.server.upstream_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.server.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "max_in_flight cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
