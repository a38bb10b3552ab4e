//! Process bootstrap: configuration, logging and shutdown signals.

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{AppConfig, CliArgs, CorsConfig, DatabaseConfig, ServerConfig};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use signals::wait_for_shutdown;
