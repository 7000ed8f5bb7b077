use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Client IP address or network (supports CIDR notation)
    pub address: String,
    /// Shared secret for this client
    pub secret: String,
    /// Optional client name/description
    #[serde(default)]
    pub name: Option<String>,
    /// Enable/disable this client
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Client {
    /// Network this entry covers; a bare address is a single-host network
    pub fn network(&self) -> Result<IpNetwork, ConfigError> {
        self.address
            .parse::<IpNetwork>()
            .or_else(|_| self.address.parse::<IpAddr>().map(IpNetwork::from))
            .map_err(|_| ConfigError::Invalid(format!("Invalid client address: {}", self.address)))
    }

    /// Enabled and covering `source_ip`
    pub fn covers(&self, source_ip: IpAddr) -> bool {
        self.enabled && self.network().is_ok_and(|network| network.contains(source_ip))
    }
}

/// Packet handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default shared secret (used if no client matches)
    #[serde(default = "default_secret")]
    pub secret: String,

    /// List of known clients
    #[serde(default)]
    pub clients: Vec<Client>,

    /// Honour the declared packet length: reject truncated datagrams and
    /// ignore trailing padding (default: false)
    #[serde(default)]
    pub strict_length_check: bool,

    /// Log level: "trace", "debug", "info", "warn", "error" (default: "info")
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_secret() -> String {
    "testing123".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            secret: default_secret(),
            clients: vec![],
            strict_length_check: false,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// First client entry covering `source_ip`
    pub fn client_for(&self, source_ip: IpAddr) -> Option<&Client> {
        self.clients.iter().find(|client| client.covers(source_ip))
    }

    /// Shared secret for packets from `source_ip`: the covering client's, or
    /// the default one
    pub fn secret_for(&self, source_ip: IpAddr) -> &[u8] {
        self.client_for(source_ip)
            .map_or(self.secret.as_bytes(), |client| client.secret.as_bytes())
    }

    /// Effective log level
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid("Secret cannot be empty".to_string()));
        }

        for client in &self.clients {
            if client.secret.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Client {} has empty secret",
                    client.address
                )));
            }
            client.network()?;
        }

        if let Some(level) = &self.log_level {
            if !matches!(
                level.as_str(),
                "trace" | "debug" | "info" | "warn" | "error"
            ) {
                return Err(ConfigError::Invalid(format!("Invalid log level: {}", level)));
            }
        }

        Ok(())
    }

    /// Create an example configuration
    pub fn example() -> Self {
        Config {
            secret: "testing123".to_string(),
            clients: vec![
                Client {
                    address: "192.168.1.0/24".to_string(),
                    secret: "client_secret_1".to_string(),
                    name: Some("Internal Network".to_string()),
                    enabled: true,
                },
                Client {
                    address: "10.0.0.1".to_string(),
                    secret: "client_secret_2".to_string(),
                    name: Some("VPN Gateway".to_string()),
                    enabled: true,
                },
            ],
            strict_length_check: true,
            log_level: Some("info".to_string()),
        }
    }
}
