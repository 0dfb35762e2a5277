use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{AccountModel, AccountWithSecret, Role};
use crate::shared::AppError;

/// Trait for account store operations
///
/// One accounts table holds every role behind a `role` discriminant column,
/// so an email resolves to at most one account regardless of role.
#[async_trait]
pub trait AccountRepository {
    /// Resolves an account by email for credential checking. This is the
    /// only lookup that returns the stored password hash.
    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithSecret>, AppError>;
    /// Resolves an account by id with the default projection (no hash).
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountModel>, AppError>;
    async fn insert_account(
        &self,
        account: &AccountModel,
        password_hash: &str,
    ) -> Result<(), AppError>;
    /// Admin toggle. Deactivation revokes live sessions on next lookup.
    async fn set_active(&self, account_id: &str, active: bool) -> Result<(), AppError>;
}

/// In-memory implementation of AccountRepository for development and testing
///
/// This provides a realistic implementation that can be used in development
/// without requiring a real database connection. Data is stored in memory
/// and will be lost when the application restarts.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, AccountWithSecret>>,
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated accounts
    pub fn with_accounts(accounts: Vec<AccountWithSecret>) -> Self {
        let mut account_map = HashMap::new();
        for entry in accounts {
            account_map.insert(entry.account.id.clone(), entry);
        }

        Self {
            accounts: Mutex::new(account_map),
        }
    }

    /// Returns the current number of accounts in the repository
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Checks if an account exists by email (useful for debugging)
    pub fn has_email(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .any(|entry| entry.account.email == email)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    #[instrument(skip(self))]
    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithSecret>, AppError> {
        debug!(email = %email, "Fetching account by email from memory");

        let accounts = self.accounts.lock().unwrap();
        let entry = accounts
            .values()
            .find(|entry| entry.account.email == email)
            .cloned();

        match &entry {
            Some(e) => {
                debug!(account_id = %e.account.id, role = %e.account.role, "Account found in memory")
            }
            None => debug!(email = %email, "Account not found in memory"),
        }

        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountModel>, AppError> {
        debug!(account_id = %account_id, "Fetching account by id from memory");

        let accounts = self.accounts.lock().unwrap();
        let account = accounts.get(account_id).map(|entry| entry.account.clone());

        Ok(account)
    }

    #[instrument(skip(self, account, password_hash))]
    async fn insert_account(
        &self,
        account: &AccountModel,
        password_hash: &str,
    ) -> Result<(), AppError> {
        debug!(account_id = %account.id, email = %account.email, "Creating account in memory");

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&account.id) {
            warn!(account_id = %account.id, "Account id already exists in memory");
            return Err(AppError::DatabaseError(
                "Account already exists".to_string(),
            ));
        }
        if accounts
            .values()
            .any(|entry| entry.account.email == account.email)
        {
            warn!(email = %account.email, "Email already registered in memory");
            return Err(AppError::DatabaseError(
                "Email already registered".to_string(),
            ));
        }
        accounts.insert(
            account.id.clone(),
            AccountWithSecret {
                account: account.clone(),
                password_hash: password_hash.to_string(),
            },
        );

        debug!(account_id = %account.id, "Account created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, account_id: &str, active: bool) -> Result<(), AppError> {
        debug!(account_id = %account_id, active = active, "Updating account active flag in memory");

        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(account_id) {
            Some(entry) => {
                entry.account.active = active;
                Ok(())
            }
            None => {
                warn!(account_id = %account_id, "Account not found for update in memory");
                Err(AppError::NotFound("Account not found".to_string()))
            }
        }
    }
}

/// PostgreSQL implementation of the account repository
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_role(raw: &str) -> Result<Role, AppError> {
        raw.parse::<Role>()
            .map_err(|_| AppError::DatabaseError(format!("Unknown role '{}' in accounts row", raw)))
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[instrument(skip(self))]
    async fn find_for_login(&self, email: &str) -> Result<Option<AccountWithSecret>, AppError> {
        debug!(email = %email, "Fetching account by email from database");

        let row = sqlx::query(
            "SELECT id, email, password_hash, role, name, active, picture, created_at FROM accounts WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch account by email from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let entry = match row {
            Some(row) => {
                let role: String = row.get("role");
                let entry = AccountWithSecret {
                    account: AccountModel {
                        id: row.get("id"),
                        email: row.get("email"),
                        role: Self::parse_role(&role)?,
                        name: row.get("name"),
                        active: row.get("active"),
                        picture: row.get("picture"),
                        created_at: row.get("created_at"),
                    },
                    password_hash: row.get("password_hash"),
                };
                debug!(account_id = %entry.account.id, "Account found in database");
                Some(entry)
            }
            None => {
                debug!(email = %email, "Account not found in database");
                None
            }
        };

        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, account_id: &str) -> Result<Option<AccountModel>, AppError> {
        debug!(account_id = %account_id, "Fetching account by id from database");

        let row = sqlx::query(
            "SELECT id, email, role, name, active, picture, created_at FROM accounts WHERE id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, account_id = %account_id, "Failed to fetch account from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let account = match row {
            Some(row) => {
                let role: String = row.get("role");
                Some(AccountModel {
                    id: row.get("id"),
                    email: row.get("email"),
                    role: Self::parse_role(&role)?,
                    name: row.get("name"),
                    active: row.get("active"),
                    picture: row.get("picture"),
                    created_at: row.get("created_at"),
                })
            }
            None => {
                debug!(account_id = %account_id, "Account not found in database");
                None
            }
        };

        Ok(account)
    }

    #[instrument(skip(self, account, password_hash))]
    async fn insert_account(
        &self,
        account: &AccountModel,
        password_hash: &str,
    ) -> Result<(), AppError> {
        debug!(account_id = %account.id, email = %account.email, "Creating account in database");

        sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, role, name, active, picture, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        )
        .bind(&account.id)
        .bind(&account.email)
        .bind(password_hash)
        .bind(account.role.to_string())
        .bind(&account.name)
        .bind(account.active)
        .bind(&account.picture)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create account in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(account_id = %account.id, "Account created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, account_id: &str, active: bool) -> Result<(), AppError> {
        debug!(account_id = %account_id, active = active, "Updating account active flag in database");

        let result = sqlx::query("UPDATE accounts SET active = $2 WHERE id = $1")
            .bind(account_id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, account_id = %account_id, "Failed to update account in database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(account_id = %account_id, "Account not found for update");
            return Err(AppError::NotFound("Account not found".to_string()));
        }

        Ok(())
    }
}
