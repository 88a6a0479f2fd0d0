use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;
use crate::dataset::SongRecord;

/// The loaded record collection. Immutable for the lifetime of the process,
/// replaced wholesale only by restarting with a different file.
pub type SharedDataset = Arc<Vec<SongRecord>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub dataset: SharedDataset,
}

impl ServerState {
    pub fn new(config: ServerConfig, dataset: Vec<SongRecord>) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            dataset: Arc::new(dataset),
        }
    }
}

impl FromRef<ServerState> for SharedDataset {
    fn from_ref(input: &ServerState) -> Self {
        input.dataset.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
