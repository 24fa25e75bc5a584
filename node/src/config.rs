//! Monitor configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use vigil_types::{ChainId, CoinSymbol, WatchedOperator};

use crate::logging::LogFormat;
use crate::MonitorError;

/// Configuration for the candidate monitor.
///
/// Can be loaded from a TOML file via [`MonitorConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Base URL of the node API queried first.
    #[serde(default = "default_primary_url")]
    pub primary_url: String,

    /// Base URL tried once when the primary fails.
    #[serde(default)]
    pub secondary_url: Option<String>,

    /// Seconds between validator list polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Coin that pays the fee of switch transactions.
    #[serde(default = "default_gas_coin")]
    pub gas_coin: CoinSymbol,

    /// Chain the transactions are signed for.
    #[serde(default)]
    pub chain_id: ChainId,

    #[serde(default = "default_gas_price")]
    pub gas_price: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter, e.g. "info" or "debug,vigil_node=trace".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to serve the read-only status endpoints.
    #[serde(default)]
    pub enable_status_server: bool,

    #[serde(default = "default_status_bind")]
    pub status_bind: String,

    #[serde(default = "default_status_port")]
    pub status_port: u16,

    /// Static watch list served by the built-in directory.
    #[serde(default)]
    pub watch: Vec<WatchedOperator>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_primary_url() -> String {
    "http://127.0.0.1:8841".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_gas_coin() -> CoinSymbol {
    CoinSymbol::BIP
}

fn default_gas_price() -> u32 {
    1
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_status_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_status_port() -> u16 {
    8842
}

// ── Impl ───────────────────────────────────────────────────────────────

impl MonitorConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, MonitorError> {
        let config: Self = toml::from_str(s).map_err(|e| MonitorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, MonitorError> {
        toml::to_string_pretty(self).map_err(|e| MonitorError::Config(e.to_string()))
    }

    /// Reject values the monitor cannot run with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.primary_url.trim().is_empty() {
            return Err(MonitorError::Config("primary_url is empty".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(MonitorError::Config("poll_interval_secs must be positive".into()));
        }
        if self.http_timeout_secs == 0 {
            return Err(MonitorError::Config("http_timeout_secs must be positive".into()));
        }
        self.log_format()?;
        if self.enable_status_server {
            self.status_addr()?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn log_format(&self) -> Result<LogFormat, MonitorError> {
        self.log_format.parse()
    }

    pub fn status_addr(&self) -> Result<SocketAddr, MonitorError> {
        format!("{}:{}", self.status_bind, self.status_port)
            .parse()
            .map_err(|e| MonitorError::Config(format!("status address: {e}")))
    }

    /// The secondary URL, ignoring an empty string.
    pub fn secondary(&self) -> Option<&str> {
        self.secondary_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            secondary_url: None,
            poll_interval_secs: default_poll_interval_secs(),
            gas_coin: default_gas_coin(),
            chain_id: ChainId::default(),
            gas_price: default_gas_price(),
            http_timeout_secs: default_http_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            enable_status_server: false,
            status_bind: default_status_bind(),
            status_port: default_status_port(),
            watch: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vigil_types::OwnerId;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = MonitorConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.gas_coin.as_str(), "BIP");
        assert_eq!(config.chain_id, ChainId::Mainnet);
        assert_eq!(config.gas_price, 1);
        assert_eq!(config.log_format, "human");
        assert!(!config.enable_status_server);
        assert!(config.secondary().is_none());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = MonitorConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = MonitorConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.primary_url, config.primary_url);
        assert_eq!(parsed.status_port, config.status_port);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            primary_url = "https://node-a.example"
            secondary_url = "https://node-b.example"
            poll_interval_secs = 15
            gas_coin = "mnt"
            chain_id = "testnet"

            [[watch]]
            owner = 42
            pub_key = "Mp0eb98ea04ae466d8d38f490db3c99b3996a90e24243952ce9822c6dc1e2c1a43"
        "#;
        let config = MonitorConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.secondary(), Some("https://node-b.example"));
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.gas_coin.as_str(), "MNT");
        assert_eq!(config.chain_id, ChainId::Testnet);
        assert_eq!(config.watch.len(), 1);
        assert_eq!(config.watch[0].owner, OwnerId(42));
        assert!(config.watch[0].alerts_enabled);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for bad in [
            "poll_interval_secs = 0",
            "http_timeout_secs = 0",
            "primary_url = \"\"",
            "log_format = \"xml\"",
            "gas_coin = \"TOO-LONG-SYMBOL\"",
            "chain_id = \"moon\"",
            "enable_status_server = true\nstatus_bind = \"not an ip\"",
        ] {
            assert!(
                matches!(MonitorConfig::from_toml_str(bad), Err(MonitorError::Config(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn serialized_config_leaves_out_private_keys() {
        let toml = r#"
            [[watch]]
            owner = 1
            pub_key = "Mp0eb98ea04ae466d8d38f490db3c99b3996a90e24243952ce9822c6dc1e2c1a43"
            address = "Mx31e61a05adbd13c6b625262704bc305bf7725026"
            private_key = "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142"
        "#;
        let config = MonitorConfig::from_toml_str(toml).unwrap();
        assert!(config.watch[0].private_key.is_some());

        let written = config.to_toml_string().unwrap();
        assert!(!written.contains("07bc17ab"));
        assert!(written.contains("Mx31e61a05adbd13c6b625262704bc305bf7725026"));
        let reread = MonitorConfig::from_toml_str(&written).unwrap();
        assert!(reread.watch[0].private_key.is_none());
    }

    #[test]
    fn blank_secondary_is_ignored() {
        let config = MonitorConfig::from_toml_str("secondary_url = \"  \"").unwrap();
        assert!(config.secondary().is_none());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_secs = 5").unwrap();
        let config = MonitorConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.poll_interval_secs, 5);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = MonitorConfig::from_toml_file("/nonexistent/vigil.toml");
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }
}
