use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::types::{AccessClaims, RefreshClaims};
use crate::account::AccountModel;
use crate::shared::AppError;

/// Configuration for JWT token operations
///
/// Holds two independent signing secrets: a compromised refresh secret must
/// not allow forging access tokens, and vice versa. Injected explicitly so
/// tests can supply their own secrets per case.
#[derive(Clone)]
pub struct TokenConfig {
    access_secret: String,
    refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl TokenConfig {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_secret: access_secret.to_string(),
            refresh_secret: refresh_secret.to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }

    /// Reads secrets and TTL overrides from the environment
    pub fn from_env() -> Self {
        let access_ttl_minutes = std::env::var("ACCESS_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);
        let refresh_ttl_days = std::env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7);

        Self {
            access_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "access-secret-change-in-production".to_string()),
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| "refresh-secret-change-in-production".to_string()),
            access_ttl_minutes,
            refresh_ttl_days,
        }
    }

    /// Mints a short-lived access token embedding the account's identity
    #[instrument(skip(self, account))]
    pub fn issue_access_token(&self, account: &AccountModel) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.access_ttl_minutes)).timestamp() as usize;

        let claims = AccessClaims {
            id: account.id.clone(),
            role: account.role,
            email: account.email.clone(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access_secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode access token");
            AppError::Internal
        })
    }

    /// Mints a refresh token carrying only the account id
    #[instrument(skip(self, account_id))]
    pub fn issue_refresh_token(&self, account_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::days(self.refresh_ttl_days)).timestamp() as usize;

        let claims = RefreshClaims {
            id: account_id.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.refresh_secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode refresh token");
            AppError::Internal
        })
    }

    /// Verifies an access token, returning None on any failure.
    ///
    /// Bad signature, malformed token and expired token all collapse to the
    /// same None verdict so callers cannot leak which check failed.
    pub fn verify_access_token(&self, token: &str) -> Option<AccessClaims> {
        Self::verify::<AccessClaims>(token, &self.access_secret)
    }

    /// Verifies a refresh token, returning None on any failure
    pub fn verify_refresh_token(&self, token: &str) -> Option<RefreshClaims> {
        Self::verify::<RefreshClaims>(token, &self.refresh_secret)
    }

    fn verify<T: serde::de::DeserializeOwned>(token: &str, secret: &str) -> Option<T> {
        // Strict expiry: a token is invalid the second it reaches its exp.
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<T>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &validation,
        ) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Token failed verification");
                None
            }
        }
    }
}
