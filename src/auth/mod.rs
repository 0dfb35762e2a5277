// Public API - what other modules can use
pub use cookies::{CookiePolicy, ACCESS_COOKIE, REFRESH_COOKIE};
pub use handlers::{login, logout, refresh, verify_login};
pub use middleware::require_auth;
pub use types::{AccessClaims, RefreshClaims};

// Internal modules
pub mod cookies;
mod handlers;
mod middleware;
pub mod password;
pub mod service;
pub mod token;
pub mod types;
