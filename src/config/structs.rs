use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TinylinkError};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 TINYLINK__SERVER__PORT=9100
pub const ENV_PREFIX: &str = "TINYLINK";

/// Static configuration, read once at startup.
///
/// Priority: ENV > config file > built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Load configuration, falling back to defaults when anything is wrong.
    ///
    /// An explicitly given path must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&str>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: Option<&str>) -> Result<Self> {
        Self::try_load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`StaticConfig::try_load`] with a custom environment prefix.
    pub fn try_load_with_prefix(path: Option<&str>, env_prefix: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let (file_path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::from(Path::new(file_path)).required(required))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;

        if Path::new(file_path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", file_path);
        }
        Ok(config)
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.store.ttl_secs == 0 {
            return Err(TinylinkError::config("store.ttl_secs must be greater than 0"));
        }
        if self.store.max_capacity == 0 {
            return Err(TinylinkError::config(
                "store.max_capacity must be greater than 0",
            ));
        }
        if self.server.workers == 0 {
            return Err(TinylinkError::config("server.workers must be greater than 0"));
        }
        Ok(())
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TinylinkError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// HTTP 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Time allowed for a client to send the request head
    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Time allowed for a client to finish receiving the response
    #[serde(default = "default_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal
    #[serde(default = "default_timeout_secs")]
    pub shutdown_timeout_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

/// 过期存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend: "moka" or "memory"
    #[serde(rename = "type")]
    #[serde(default = "default_store_type")]
    pub store_type: String,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Background sweep interval for the memory backend, 0 disables it
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl StoreConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    9000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_store_type() -> String {
    "moka".to_string()
}

fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_max_capacity() -> u64 {
    1_000_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            read_timeout_secs: default_timeout_secs(),
            write_timeout_secs: default_timeout_secs(),
            shutdown_timeout_secs: default_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: default_store_type(),
            ttl_secs: default_ttl_secs(),
            max_capacity: default_max_capacity(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}
