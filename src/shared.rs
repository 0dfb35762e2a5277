use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::account::AccountRepository;
use crate::auth::token::TokenConfig;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub account_repository: Arc<dyn AccountRepository + Send + Sync>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        account_repository: Arc<dyn AccountRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            account_repository,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is not active")]
    AccountInactive,

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
            }
            AppError::AccountInactive => (StatusCode::FORBIDDEN, "User is not active".to_string()),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "No token provided".to_string()),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::account::{AccountModel, AccountWithSecret};
    use async_trait::async_trait;

    /// Dummy account repository that knows nobody - for tests that don't care about accounts
    pub struct DummyAccountRepository;

    #[async_trait]
    impl AccountRepository for DummyAccountRepository {
        async fn find_for_login(
            &self,
            _email: &str,
        ) -> Result<Option<AccountWithSecret>, AppError> {
            Ok(None)
        }
        async fn find_by_id(&self, _account_id: &str) -> Result<Option<AccountModel>, AppError> {
            Ok(None)
        }
        async fn insert_account(
            &self,
            _account: &AccountModel,
            _password_hash: &str,
        ) -> Result<(), AppError> {
            Ok(())
        }
        async fn set_active(&self, _account_id: &str, _active: bool) -> Result<(), AppError> {
            Ok(())
        }
    }

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        account_repository: Option<Arc<dyn AccountRepository + Send + Sync>>,
        token_config: Option<TokenConfig>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                account_repository: None,
                token_config: None,
            }
        }

        pub fn with_account_repository(
            mut self,
            repo: Arc<dyn AccountRepository + Send + Sync>,
        ) -> Self {
            self.account_repository = Some(repo);
            self
        }

        pub fn with_token_config(mut self, config: TokenConfig) -> Self {
            self.token_config = Some(config);
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                account_repository: self
                    .account_repository
                    .unwrap_or_else(|| Arc::new(DummyAccountRepository)),
                token_config: self.token_config.unwrap_or_else(|| {
                    TokenConfig::new("test-access-secret", "test-refresh-secret")
                }),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
