//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use matrix_sheets::{LabelPolicy, MatrixStore, MemoryStore, SqliteStore, StoreResult};

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Settings for `serve`, readable from flags or environment
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "MSHEETS_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// SQLite database file (in-memory store when omitted)
    #[arg(long, env = "MSHEETS_DATABASE")]
    pub database: Option<PathBuf>,

    /// Number of mock matrices to seed on start
    #[arg(long, env = "MSHEETS_SEED", default_value_t = 0)]
    pub seed: usize,

    /// Let the last duplicate label win instead of rejecting the matrix
    #[arg(long, env = "MSHEETS_LENIENT_LABELS")]
    pub lenient_labels: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database: None,
            seed: 0,
            lenient_labels: false,
        }
    }
}

impl ServerConfig {
    pub fn label_policy(&self) -> LabelPolicy {
        if self.lenient_labels {
            LabelPolicy::LastWins
        } else {
            LabelPolicy::Strict
        }
    }

    /// Open the configured store
    pub fn open_store(&self) -> StoreResult<Arc<dyn MatrixStore>> {
        let store: Arc<dyn MatrixStore> = match &self.database {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using SQLite store");
                Arc::new(SqliteStore::open(path)?)
            }
            None => {
                tracing::info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_flag_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.label_policy(), LabelPolicy::Strict);
    }

    #[test]
    fn test_lenient_labels() {
        let config = ServerConfig {
            lenient_labels: true,
            ..Default::default()
        };
        assert_eq!(config.label_policy(), LabelPolicy::LastWins);
    }
}
