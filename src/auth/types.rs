use serde::{Deserialize, Serialize};

use crate::account::{AccountModel, Role};

/// Claims carried by the short-lived access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
    pub jti: String, // Unique per issuance, so rotation always changes the token
}

/// Claims carried by the refresh token. Only the account id: a leaked
/// refresh token exposes nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshClaims {
    pub id: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// A freshly minted access/refresh pair. Only ever leaves the process as
/// cookie values, never in a response body.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Request body for the login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Non-sensitive identity fields returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPayload {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl From<&AccountModel> for UserPayload {
    fn from(account: &AccountModel) -> Self {
        Self {
            id: account.id.clone(),
            role: account.role,
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Response body for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserPayload,
}

/// Response body for a successful refresh. Cookie-only transport: the
/// rotated tokens are not echoed here.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
}

/// Response body for logout
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Response body for the login-verification endpoint. "Not logged in" is a
/// normal outcome carried by `logged_in: false`, not an error status.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyLoginResponse {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_serialization() {
        let claims = AccessClaims {
            id: "account-1".to_string(),
            role: Role::Student,
            email: "a@x.com".to_string(),
            exp: 1234567890,
            iat: 1234567800,
            jti: "token-1".to_string(),
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("account-1"));
        assert!(json.contains("\"role\":\"student\""));

        let deserialized: AccessClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_verify_login_response_wire_format() {
        let logged_out = VerifyLoginResponse {
            logged_in: false,
            user: None,
        };
        let json = serde_json::to_string(&logged_out).unwrap();
        assert_eq!(json, r#"{"loggedIn":false}"#);

        let account = AccountModel::new(
            "a@x.com".to_string(),
            "Alice".to_string(),
            Role::Instructor,
        );
        let logged_in = VerifyLoginResponse {
            logged_in: true,
            user: Some(UserPayload::from(&account)),
        };
        let json = serde_json::to_string(&logged_in).unwrap();
        assert!(json.contains(r#""loggedIn":true"#));
        assert!(json.contains(r#""role":"instructor""#));
    }

    #[test]
    fn test_user_payload_from_account() {
        let account = AccountModel::new("b@x.com".to_string(), "Bob".to_string(), Role::Admin);
        let payload = UserPayload::from(&account);

        assert_eq!(payload.id, account.id);
        assert_eq!(payload.email, "b@x.com");
        assert_eq!(payload.name, "Bob");
        assert_eq!(payload.role, Role::Admin);
    }
}
