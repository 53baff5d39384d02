//! Swatch configuration.
//!
//! Configuration is read from a TOML file and then adjusted by environment
//! variables. A missing file is not an error: every field has a default, so
//! `swatch serve` works out of the box against an in-memory store.
//!
//! Resolution order for the file path:
//!
//! 1. An explicit path (`--config`)
//! 2. `$SWATCH_CONFIG`
//! 3. `<config dir>/swatch/config.toml`

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SWATCH_CONFIG";

// ============================================================================
// Sections
// ============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Which document store backs persons and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, lost on restart
    #[default]
    Memory,
    /// Single-file embedded database
    Redb,
}

impl StoreBackend {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Redb => "redb",
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend selection
    pub backend: StoreBackend,
    /// Database file, used by the `redb` backend
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: PathBuf::from("swatch.redb"),
        }
    }
}

/// Where session contexts live between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process-local map
    #[default]
    Memory,
    /// Redis, requires the `redis` feature
    Redis,
}

/// Session cookie and store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie carrying the session key
    pub cookie_name: String,
    /// Secret the cookie signing key is derived from.
    ///
    /// When unset a random key is generated at startup, so sessions do not
    /// survive a restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Backend selection
    pub backend: SessionBackend,
    /// Redis connection URL for the `redis` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,
    /// Idle lifetime of a Redis-backed session, in seconds
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "swatch.sid".to_string(),
            secret: None,
            backend: SessionBackend::default(),
            redis_url: None,
            ttl_secs: 60 * 60 * 24,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,swatch=debug,tower_http=info".to_string(),
        }
    }
}

// ============================================================================
// SwatchConfig
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    /// `[server]`
    pub server: ServerConfig,
    /// `[store]`
    pub store: StoreConfig,
    /// `[session]`
    pub session: SessionConfig,
    /// `[logging]`
    pub logging: LoggingConfig,
}

impl SwatchConfig {
    /// Project name used for the config directory.
    pub fn project_name() -> &'static str {
        "swatch"
    }

    /// Default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file to read.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load configuration from disk and apply environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                Self::from_toml_str(&content)
                    .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?
            }
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Recognized: `PORT`, `SWATCH_PORT` (wins over `PORT`), `SWATCH_HOST`,
    /// `SWATCH_STORE_PATH` (also selects the `redb` backend),
    /// `SWATCH_SESSION_SECRET`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["PORT", "SWATCH_PORT"] {
            if let Some(port) = lookup(key) {
                self.server.port = port
                    .parse()
                    .map_err(|_| Error::config(format!("{key} must be a port number, got '{port}'")))?;
            }
        }
        if let Some(host) = lookup("SWATCH_HOST") {
            self.server.host = host;
        }
        if let Some(path) = lookup("SWATCH_STORE_PATH") {
            self.store.backend = StoreBackend::Redb;
            self.store.path = PathBuf::from(path);
        }
        if let Some(secret) = lookup("SWATCH_SESSION_SECRET") {
            self.session.secret = Some(secret);
        }
        Ok(())
    }

    /// The address the server should bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                Error::config(format!(
                    "Invalid listen address {}:{}: {e}",
                    self.server.host, self.server.port
                ))
            })
    }
}
