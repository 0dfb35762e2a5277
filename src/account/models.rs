use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Account role discriminant. Stored as lowercase text in the accounts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

/// Database model for the accounts table.
///
/// The password hash is deliberately not a field here: the default
/// projection can never leak it, in serialization or in logs. Lookups that
/// need the hash return an [`AccountWithSecret`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: String, // UUID v4 as string
    pub email: String,
    pub role: Role,
    pub name: String,
    pub active: bool,
    pub picture: Option<String>, // profile picture URL, hosted externally
    pub created_at: DateTime<Utc>,
}

/// Login-path projection: the account plus its stored password hash.
///
/// Only `find_for_login` produces this; everything downstream of credential
/// verification goes back to working with the bare [`AccountModel`].
#[derive(Debug, Clone)]
pub struct AccountWithSecret {
    pub account: AccountModel,
    pub password_hash: String,
}

impl AccountModel {
    /// Creates a new active account with a generated ID and timestamp
    pub fn new(email: String, name: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            role,
            name,
            active: true,
            picture: None,
            created_at: Utc::now(),
        }
    }
}
