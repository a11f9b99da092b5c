//! Application startup and lifecycle management.

use crate::config::Config;
use crate::services::{BrokerNotifier, Notifier};
use crate::{router, AppState};
use axum::Router;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, publishing notifications to the configured broker.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let notifier = BrokerNotifier::new(config.broker.clone());
        tracing::info!(
            topic = %config.broker.topic,
            connect_timeout_ms = config.broker.connect_timeout.as_millis() as u64,
            deadline_ms = config.broker.deadline.as_millis() as u64,
            "Notification publisher configured"
        );

        Self::build_with_notifier(config, Arc::new(notifier)).await
    }

    /// Build the application around any [`Notifier`].
    pub async fn build_with_notifier(
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = (config.server.host.as_str(), config.server.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(
                "Failed to bind HTTP listener to {}:{}: {}",
                config.server.host,
                config.server.port,
                e
            );
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("{}: HTTP on port {}", config.service_name, port);

        let state = AppState { config, notifier };

        Ok(Self {
            port,
            listener,
            router: router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
