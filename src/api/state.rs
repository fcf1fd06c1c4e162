//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{InMemoryUserStore, UserStore};

/// Application state shared by every handler.
///
/// The store is constructed once per process (or per test) and handed in
/// explicitly; nothing here is global.
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub users: Arc<dyn UserStore>,
    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state with an injected store.
    pub fn new(users: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            users,
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()), config)
    }
}
