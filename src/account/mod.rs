// Public API - what other modules can use
pub use models::{AccountModel, AccountWithSecret, Role};
pub use repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};

// Internal modules
pub mod models;
pub mod repository;
