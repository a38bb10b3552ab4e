use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level for every target.
    pub level: String,
    pub format: LogFormat,
    /// Extra `target=level` directives, e.g. `sqlx=warn`.
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            directives: vec!["sqlx=warn".to_owned(), "sea_orm=warn".to_owned()],
        }
    }
}

impl LoggingConfig {
    /// Filter string for `EnvFilter`, e.g. `info,sqlx=warn`.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        std::iter::once(self.level.as_str())
            .chain(self.directives.iter().map(String::as_str))
            .filter(|d| !d.trim().is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over the config.
///
/// # Errors
/// Fails on an invalid filter or if a subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(cfg.filter_directives())
            .with_context(|| format!("invalid log filter '{}'", cfg.filter_directives()))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_join_level_first_and_skip_blanks() {
        let cfg = LoggingConfig {
            level: "debug".to_owned(),
            format: LogFormat::Json,
            directives: vec!["hyper=warn".to_owned(), "  ".to_owned()],
        };
        assert_eq!(cfg.filter_directives(), "debug,hyper=warn");
    }

    #[test]
    fn format_deserializes_lowercase() {
        let cfg: LoggingConfig =
            serde_json::from_value(serde_json::json!({ "format": "json" })).unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.level, "info");
    }
}
