// Library crate for the LearnLab auth backend
// This file exposes the public API for integration tests

pub mod account;
pub mod auth;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use account::{AccountModel, AccountRepository, InMemoryAccountRepository, Role};
pub use auth::{AccessClaims, RefreshClaims};
pub use shared::{AppError, AppState};
