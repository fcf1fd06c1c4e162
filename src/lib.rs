//! User Accounts API - in-memory user account management
//!
//! A single authoritative [`UserStore`](services::UserStore) owns every
//! account. It validates registrations, enforces email/username uniqueness
//! and only ever hands out credential-free [`SafeUser`] views. A thin axum
//! adapter exposes it over HTTP.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities (user, role, credential)
//! - **services**: The user store contract and its in-memory implementation
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **utils**: Field validation combinator
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Bind elsewhere with debug logging
//! cargo run -- -v serve --host 127.0.0.1 --port 8081
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::{Config, Environment};
pub use domain::{NewUser, Password, SafeUser, UserRole, UserUpdate};
pub use errors::{AppError, AppResult};
pub use services::{InMemoryUserStore, UserStore};
