pub mod handlers;
pub mod response;
pub mod routes;

pub use routes::*;

use crate::config::SearchConfig;
use crate::domain::DomainRegistry;
use crate::engine::SearchEngine;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DomainRegistry>,
    pub engine: Arc<dyn SearchEngine>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(
        registry: Arc<DomainRegistry>,
        engine: Arc<dyn SearchEngine>,
        search: SearchConfig,
    ) -> Self {
        Self {
            registry,
            engine,
            search,
        }
    }
}
