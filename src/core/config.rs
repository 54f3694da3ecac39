use crate::models::user::{default_users, UserRecord};
use crate::stores::user_registry::MAX_USER_ID;
use anyhow::{bail, Context, Result};
use axum::http::{header, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub product: ProductConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegistryConfig {
    /// Records the registry starts with; the built-in demo users when absent
    pub seed: Option<Vec<UserRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    /// Share of simulated product writes that fail, 0.0 to 1.0
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
    #[serde(default = "default_allow_methods")]
    pub allow_methods: String,
    #[serde(default = "default_allow_headers")]
    pub allow_headers: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    /// Report registry failures as 400/404 instead of a blanket 500
    #[serde(default)]
    pub distinct_error_status: bool,
}

// Default value functions
fn default_port() -> Option<u16> {
    Some(3000)
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

fn default_max_requests() -> usize {
    500
}

fn default_failure_rate() -> f64 {
    0.1
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_allow_methods() -> String {
    "GET, POST, OPTIONS".to_string()
}

fn default_allow_headers() -> String {
    "Content-Type, Authorization".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            unix_socket: None,
            num_threads: default_num_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
        }
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            failure_rate: default_failure_rate(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_methods: default_allow_methods(),
            allow_headers: default_allow_headers(),
        }
    }
}

impl RegistryConfig {
    pub fn seed_users(&self) -> Vec<UserRecord> {
        self.seed.clone().unwrap_or_else(default_users)
    }
}

impl CorsConfig {
    /// Response headers applied to every route
    pub fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let pairs = [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, &self.allow_origin),
            (header::ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, &self.allow_headers),
        ];

        pairs
            .into_iter()
            .map(|(name, value)| -> Result<(HeaderName, HeaderValue)> {
                let value = HeaderValue::from_str(value)
                    .context(format!("Invalid value for {}: '{}'", name, value))?;
                Ok((name, value))
            })
            .collect()
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        // Validate registry seed
        if let Some(seed) = &self.registry.seed {
            let mut seen = HashSet::new();
            for user in seed {
                if user.id == 0 || user.id > MAX_USER_ID {
                    bail!(
                        "Seed user '{}' must have an id between 1 and {}",
                        user.name,
                        MAX_USER_ID
                    );
                }
                if !seen.insert(user.id) {
                    bail!("Duplicate seed user id {}", user.id);
                }
                if user.name.trim().is_empty() || user.device_model.trim().is_empty() {
                    bail!("Seed user {} must have a name and deviceModel", user.id);
                }
            }
        }

        if self.viewer.max_requests == 0 {
            bail!("viewer.max_requests must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.product.failure_rate) {
            bail!(
                "product.failure_rate must be between 0.0 and 1.0, got {}",
                self.product.failure_rate
            );
        }

        self.cors.headers()?;

        Ok(())
    }
}
