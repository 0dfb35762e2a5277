pub mod actions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::{cookie_value, get_verify, json_body, post_login, post_logout, post_refresh};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, ACCESS_SECRET, PASSWORD, REFRESH_SECRET};
