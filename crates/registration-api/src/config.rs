//! Configuration for the registration API.

use anyhow::{Context, Result};
use registration_notifier::MailerConfig;
use registration_store::PostgresConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cross-origin configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Admin page configuration
    #[serde(default)]
    pub admin: AdminConfig,

    /// Notification email configuration
    #[serde(default)]
    pub mail: MailerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL (if unset, registrations are kept in memory)
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// How long to wait for a connection
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or `*` for any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// HTML file served at `/admin`. A relative path is looked up in the
    /// working directory first, then in this crate's directory.
    #[serde(default = "default_admin_page")]
    pub page_path: PathBuf,
}

impl AdminConfig {
    /// Path of the admin page to serve.
    pub fn resolved_page_path(&self) -> PathBuf {
        resolve_page_path(&self.page_path, Path::new(env!("CARGO_MANIFEST_DIR")))
    }
}

fn resolve_page_path(path: &Path, crate_dir: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }

    let bundled = crate_dir.join(path);
    if bundled.exists() {
        bundled
    } else {
        path.to_path_buf()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Parsed form of [`CorsConfig::allowed_origins`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl DatabaseConfig {
    /// PostgreSQL settings, if a database URL is configured.
    pub fn postgres(&self) -> Option<PostgresConfig> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        Some(PostgresConfig {
            url: url.to_string(),
            pool_size: self.pool_size,
            connect_timeout: self.connect_timeout,
        })
    }
}

impl CorsConfig {
    pub fn origins(&self) -> AllowedOrigins {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: default_pool_size(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            page_path: default_admin_page(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_allowed_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".into()
}

fn default_admin_page() -> PathBuf {
    PathBuf::from("static/admin.html")
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Flat variable names that older deployments used, with the nested key that
/// replaced each. These are not read.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("DATABASE_URL", "DATABASE__URL"),
    ("SMTP_HOST", "MAIL__SMTP_HOST"),
    ("SMTP_PORT", "MAIL__SMTP_PORT"),
    ("SMTP_USER", "MAIL__SMTP_USER"),
    ("SMTP_PASS", "MAIL__SMTP_PASS"),
    ("NOTIFY_EMAIL", "MAIL__NOTIFY_EMAIL"),
];

/// Legacy variables that are set, paired with the key to use instead.
pub fn legacy_env_vars(is_set: impl Fn(&str) -> bool) -> Vec<(&'static str, &'static str)> {
    LEGACY_ENV_VARS
        .iter()
        .copied()
        .filter(|(legacy, _)| is_set(legacy))
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nested keys use `__`, e.g. `DATABASE__URL` or `MAIL__SMTP_USER`.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
