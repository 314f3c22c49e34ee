//! Gatehouse Server entry point.

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use gatehouse_server::config::Config;
use gatehouse_service::Bcrypt;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let provider = gatehouse_server::credential_provider(&config);

    // A configuration with a broken hash is never served.
    match gatehouse_server::check_web_config(provider.as_ref(), &Bcrypt) {
        Ok(users) => tracing::info!(
            users,
            web_config = ?config.web_config_file,
            "web configuration valid",
        ),
        Err(e) => {
            tracing::error!(error = %e, "invalid web configuration");
            return ExitCode::FAILURE;
        }
    }

    if config.check_config {
        return ExitCode::SUCCESS;
    }

    if config.web_config_file.is_none() {
        tracing::warn!("no web config file given, authentication is disabled");
    }

    let addr = match config.host.parse() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "invalid bind address");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        cache_size = config.cache_size,
        web_root = ?config.web_root,
        "Gatehouse starting",
    );

    let app = gatehouse_server::app(&config, provider);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "Gatehouse ready");

    if let Err(e) = gatehouse_http::serve(listener, app, shutdown_signal()).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Gatehouse shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
