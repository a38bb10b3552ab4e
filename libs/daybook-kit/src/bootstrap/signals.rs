use anyhow::Result;
use tokio::signal;

/// Resolve once Ctrl+C or SIGTERM arrives.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    let which = tokio::select! {
        result = ctrl_c() => result?,
        result = sigterm() => result?,
    };
    tracing::info!(signal = which, "shutdown signal received, draining connections");
    Ok(())
}

async fn ctrl_c() -> Result<&'static str> {
    signal::ctrl_c().await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
    })?;
    Ok("ctrl_c")
}

#[cfg(unix)]
async fn sigterm() -> Result<&'static str> {
    let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate()).inspect_err(|e| {
        tracing::error!(error = %e, "failed to install SIGTERM handler");
    })?;
    stream.recv().await;
    Ok("sigterm")
}

#[cfg(not(unix))]
async fn sigterm() -> Result<&'static str> {
    std::future::pending::<Result<&'static str>>().await
}
