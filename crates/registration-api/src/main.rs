//! Event registration API - Entry point.

use registration_api::{
    api::{create_router, AppState},
    config::{legacy_env_vars, Config},
    telemetry,
};
use registration_notifier::SmtpNotifier;
use registration_store::Store;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    telemetry::init(&config.log);

    info!("Starting registration API");

    for (legacy, replacement) in legacy_env_vars(|name| std::env::var_os(name).is_some()) {
        warn!("{} is set but ignored, use {} instead", legacy, replacement);
    }

    // Initialize storage
    let store = match Store::new(config.database.postgres()).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };
    info!(backend = store.backend(), "Storage ready");

    // Initialize notifications
    if config.mail.is_enabled() {
        info!(
            smtp_host = %config.mail.smtp_host,
            smtp_port = config.mail.smtp_port,
            "Registration emails enabled"
        );
    } else {
        warn!("Registration emails disabled: set MAIL__SMTP_USER, MAIL__SMTP_PASS and MAIL__NOTIFY_EMAIL");
    }
    let notifier = Arc::new(SmtpNotifier::new(config.mail.clone()));

    let state = AppState::new(store, notifier);
    let app = create_router(state, &config);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
