//! HTTP API for company profile intake.
//!
//! Exposes the intake pipeline over axum:
//! - `POST /ingest` runs extraction, validation, SIN mapping and the checklist
//! - `GET /` and `GET /health` report service status
//! - `GET /ui` serves a small browser form

pub mod handlers;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use intake_core::{IntakeConfig, IntakePipeline};

pub use handlers::{create_router, AppState};

/// Server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build application state from configuration.
pub fn app_state(config: &IntakeConfig) -> AppState {
    AppState {
        pipeline: Arc::new(IntakePipeline::from_config(config)),
    }
}

/// Start the HTTP server and run until it stops.
pub async fn start_server(config: IntakeConfig) -> Result<(), ServerError> {
    let addr = config.server.bind_addr();

    info!("Starting intake server");
    if config.audit.enabled {
        info!("Audit log: {}", config.audit.log_path.display());
    }

    let app = create_router(app_state(&config));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let mut config = IntakeConfig::default();
        config.server.port = taken.local_addr().unwrap().port();
        config.audit.enabled = false;

        let err = start_server(config).await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
    }
}
