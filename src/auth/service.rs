use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::password::verify_password;
use super::token::TokenConfig;
use super::types::IssuedTokens;
use crate::account::{AccountModel, AccountRepository};
use crate::shared::AppError;

/// Service for the session lifecycle: login, refresh rotation and identity
/// lookup. Stateless apart from the account store - there is no session
/// table, so concurrent logins and refreshes for one account need no locking.
pub struct SessionService {
    repository: Arc<dyn AccountRepository + Send + Sync>,
    token_config: TokenConfig,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn AccountRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            repository,
            token_config,
        }
    }

    /// Verifies credentials and mints a fresh token pair.
    ///
    /// Check order is fixed: existence, then credentials, then active flag.
    /// An inactive account with the right password learns it is inactive,
    /// not that it does not exist.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(IssuedTokens, AccountModel), AppError> {
        info!(email = %email, "Attempting login");

        let entry = self
            .repository
            .find_for_login(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(password, &entry.password_hash)? {
            warn!(email = %email, "Login rejected: credential mismatch");
            return Err(AppError::InvalidCredentials);
        }

        if !entry.account.active {
            warn!(account_id = %entry.account.id, "Login rejected: account inactive");
            return Err(AppError::AccountInactive);
        }

        let tokens = self.mint_tokens(&entry.account)?;
        info!(
            account_id = %entry.account.id,
            role = %entry.account.role,
            "Login successful"
        );

        Ok((tokens, entry.account))
    }

    /// Rotates a refresh token into a fresh access/refresh pair.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<IssuedTokens, AppError> {
        let token = refresh_token.ok_or(AppError::MissingToken)?;

        let claims = self
            .token_config
            .verify_refresh_token(token)
            .ok_or(AppError::InvalidToken)?;

        // A missing account and an inactive one are the same outcome here:
        // the token no longer corresponds to a usable identity.
        let account = match self.repository.find_by_id(&claims.id).await? {
            Some(account) if account.active => account,
            _ => {
                warn!(account_id = %claims.id, "Refresh rejected: account missing or inactive");
                return Err(AppError::AccountInactive);
            }
        };

        let tokens = self.mint_tokens(&account)?;
        info!(account_id = %account.id, "Session refreshed");

        Ok(tokens)
    }

    /// Resolves the account behind an access token, treating every
    /// not-logged-in path as a normal None outcome rather than an error.
    ///
    /// A cryptographically valid token for a deleted or deactivated account
    /// also resolves to None: account state revokes tokens that are still
    /// within their expiry window.
    #[instrument(skip(self, access_token))]
    pub async fn verify_login(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<AccountModel>, AppError> {
        let token = match access_token {
            Some(token) => token,
            None => return Ok(None),
        };

        let claims = match self.token_config.verify_access_token(token) {
            Some(claims) => claims,
            None => return Ok(None),
        };

        let account = match self.repository.find_by_id(&claims.id).await? {
            Some(account) if account.active => account,
            _ => {
                info!(account_id = %claims.id, "Valid token for missing or inactive account");
                return Ok(None);
            }
        };

        Ok(Some(account))
    }

    fn mint_tokens(&self, account: &AccountModel) -> Result<IssuedTokens, AppError> {
        Ok(IssuedTokens {
            access_token: self.token_config.issue_access_token(account)?,
            refresh_token: self.token_config.issue_refresh_token(&account.id)?,
        })
    }
}
