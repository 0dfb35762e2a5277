use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use learnlab::{
    account::{AccountModel, AccountWithSecret, InMemoryAccountRepository, Role},
    auth,
    auth::token::TokenConfig,
    shared::AppState,
};

pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const REFRESH_SECRET: &str = "integration-refresh-secret";
pub const PASSWORD: &str = "Correct1!";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub accounts: Vec<AccountModel>,
    pub repo: Arc<InMemoryAccountRepository>,
}

impl TestSetup {
    /// The token config the app under test was built with
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET)
    }
}

pub struct TestSetupBuilder {
    accounts: Vec<(String, String, Role, bool)>, // email, password, role, active
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { accounts: vec![] }
    }

    pub fn with_account(mut self, email: &str, password: &str, role: Role) -> Self {
        self.accounts
            .push((email.to_string(), password.to_string(), role, true));
        self
    }

    pub fn with_inactive_account(mut self, email: &str, password: &str, role: Role) -> Self {
        self.accounts
            .push((email.to_string(), password.to_string(), role, false));
        self
    }

    /// One active student with the shared test password
    pub fn with_student(self) -> Self {
        self.with_account("a@x.com", PASSWORD, Role::Student)
    }

    pub fn build(self) -> TestSetup {
        let mut seeded = Vec::new();
        let mut accounts = Vec::new();

        for (email, password, role, active) in self.accounts {
            let mut account = AccountModel::new(email.clone(), format!("Name of {}", email), role);
            account.active = active;
            accounts.push(account.clone());
            seeded.push(AccountWithSecret {
                account,
                // Minimum cost keeps the suite fast
                password_hash: bcrypt::hash(&password, 4).unwrap(),
            });
        }

        let repo = Arc::new(InMemoryAccountRepository::with_accounts(seeded));
        let state = AppState::new(repo.clone(), TokenConfig::new(ACCESS_SECRET, REFRESH_SECRET));

        // Same routes main() mounts, minus the tracing/cors layers
        let app = Router::new()
            .route("/auth/login", post(auth::login))
            .route("/auth/refresh", post(auth::refresh))
            .route("/auth/logout", post(auth::logout))
            .route("/auth/verify", get(auth::verify_login))
            .with_state(state);

        TestSetup {
            app,
            accounts,
            repo,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
