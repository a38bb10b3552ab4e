//! Layered application configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML file passed with
//! `--config`, `DAYBOOK__*` environment variables (`__` separates nesting,
//! e.g. `DAYBOOK__SERVER__BIND_ADDR`), then CLI overrides.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "DAYBOOK__";
pub const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    /// Per-module sections, keyed by module name.
    pub modules: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age_secs: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .map(str::to_owned)
                .to_vec(),
            allowed_headers: [
                "content-type",
                "x-user-id",
                "x-user-email",
                "x-request-id",
            ]
            .map(str::to_owned)
            .to_vec(),
            max_age_secs: Some(600),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SeaORM connection string, e.g. `sqlite://daybook.db?mode=rwc` or `postgres://...`.
    pub dsn: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://daybook.db?mode=rwc".to_owned(),
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            modules: BTreeMap::new(),
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then the environment.
    ///
    /// # Errors
    /// Fails when the file is missing or a layer does not deserialize.
    pub fn load_layered(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment
            .extract()
            .context("failed to load layered configuration")
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map_or(self.server.bind_addr.as_str(), |(host, _)| host);
            self.server.bind_addr = format!("{host}:{port}");
        }
        if args.mock {
            self.database.dsn = MOCK_DSN.to_owned();
            // every connection to sqlite::memory: opens its own database
            self.database.max_connections = 1;
        }
        match args.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Deserialize the `modules.<name>` section, or `T::default()` when absent.
    ///
    /// # Errors
    /// Fails when the section exists but does not match `T`.
    pub fn module_config<T>(&self, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(name) {
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("invalid configuration for module '{name}'")),
            None => Ok(T::default()),
        }
    }

    /// # Errors
    /// Fails on an unparsable bind address or empty database DSN.
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))?;
        if self.database.dsn.trim().is_empty() {
            bail!("database.dsn must not be empty");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be positive");
        }
        Ok(())
    }

    /// # Errors
    /// Fails if the configuration cannot be serialized.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}
