//! Shared handler state

use std::sync::Arc;

use matrix_sheets::{GridAssembler, MatrixStore};

use crate::error::ApiError;

/// Store handle and assembler settings shared by every request
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn MatrixStore>,
    assembler: GridAssembler,
}

impl AppState {
    pub fn new(store: Arc<dyn MatrixStore>, assembler: GridAssembler) -> Self {
        Self { store, assembler }
    }

    pub fn store(&self) -> &Arc<dyn MatrixStore> {
        &self.store
    }

    pub fn assembler(&self) -> GridAssembler {
        self.assembler
    }

    /// Run a store operation on the blocking pool
    ///
    /// Store calls are synchronous (SQLite holds a mutex for the whole
    /// statement), so they never run on the async workers.
    pub async fn run<T, E, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn MatrixStore, &GridAssembler) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let assembler = self.assembler;
        tokio::task::spawn_blocking(move || f(store.as_ref(), &assembler))
            .await?
            .map_err(Into::into)
    }
}
