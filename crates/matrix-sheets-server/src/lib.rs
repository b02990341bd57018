//! # matrix-sheets-server
//!
//! JSON API over a [`MatrixStore`](matrix_sheets::MatrixStore).
//!
//! | Method | Path                               |
//! |--------|------------------------------------|
//! | GET    | `/api`                             |
//! | POST   | `/api/auth`                        |
//! | GET    | `/api/matrix`                      |
//! | POST   | `/api/matrix`                      |
//! | GET    | `/api/matrix/:id`                  |
//! | PUT    | `/api/matrix/:id`                  |
//! | DELETE | `/api/matrix/:id`                  |
//! | GET    | `/api/user/:id/matrix`             |
//! | GET    | `/api/user/:id/matrix/:matrix_id`  |
//!
//! Matrices are served in the shape
//! `{"name", "grid", "row_names", "col_names"}`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use matrix_sheets::{seed_mock_data, GridAssembler};
use tokio::net::TcpListener;

/// Errors that stop the server from starting or running
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Failed to open store: {0}")]
    Store(#[from] matrix_sheets::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the configured store, seed it, and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    let store = config.open_store()?;
    if config.seed > 0 {
        let count = config.seed;
        let seeding = std::sync::Arc::clone(&store);
        tokio::task::spawn_blocking(move || seed_mock_data(seeding.as_ref(), count))
            .await
            .map_err(std::io::Error::other)??;
    }

    let state = AppState::new(store, GridAssembler::with_label_policy(config.label_policy()));
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
