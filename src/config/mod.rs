use serde::Deserialize;
use std::time::Duration;

/// Complete Nestkeeper configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NestkeeperConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the dashboard API binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Allow the dashboard frontend dev server to call the API cross-origin
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8420".to_string()
}

fn default_cors_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_enabled: default_cors_enabled(),
        }
    }
}

/// Alert banner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// How long a triggered alert banner stays up before auto-dismissing
    /// (seconds)
    #[serde(default = "default_display_seconds")]
    pub display_seconds: u64,
}

fn default_display_seconds() -> u64 {
    5
}

impl AlertConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_secs(self.display_seconds)
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            display_seconds: default_display_seconds(),
        }
    }
}

impl Default for NestkeeperConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            alerts: AlertConfig::default(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<NestkeeperConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: NestkeeperConfig = toml::from_str(&contents)?;
    Ok(config)
}
