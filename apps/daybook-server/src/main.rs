mod http;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use daybook::{DaybookConfig, DaybookModule};
use daybook_kit::api::OpenApiInfo;
use daybook_kit::bootstrap::{AppConfig, CliArgs, init_logging, wait_for_shutdown};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

const MODULE_NAME: &str = "daybook";

/// Daybook Server - daily focus, weekly plans, expenses and meals
#[derive(Parser)]
#[command(name = "daybook-server")]
#[command(about = "Daybook Server - daily focus, weekly plans, expenses and meals")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.clone(),
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // defaults -> YAML -> DAYBOOK__* env -> CLI
    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    init_logging(&config.logging)?;
    tracing::info!("Daybook Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    let _: DaybookConfig = config.module_config(MODULE_NAME)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    let db = &config.database;
    let mut opts = ConnectOptions::new(db.dsn.clone());
    opts.max_connections(db.max_connections)
        .connect_timeout(Duration::from_secs(db.connect_timeout_secs))
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database '{}'", redact(&db.dsn)))
}

/// Drop credentials from a DSN before it reaches a log line.
fn redact(dsn: &str) -> String {
    match (dsn.find("://"), dsn.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}://***{}", &dsn[..scheme], &dsn[at..])
        }
        _ => dsn.to_owned(),
    }
}

async fn run_server(config: &AppConfig) -> Result<()> {
    config.validate()?;
    let module_config: DaybookConfig = config.module_config(MODULE_NAME)?;

    let db = connect(config).await?;
    DaybookModule::migrate(&db).await?;
    let module = DaybookModule::init(&db, &module_config)?;

    let router = http::apply_middleware(
        module.router(&OpenApiInfo::default()),
        &config.server,
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed");
            }
        })
        .await?;

    db.close().await?;
    tracing::info!("Daybook Server stopped");
    Ok(())
}
