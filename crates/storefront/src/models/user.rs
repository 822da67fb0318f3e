//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skinaura_core::{Email, UserId, UserRole};

/// A storefront account.
///
/// Passwords never appear here; credential checks happen inside the session
/// service and only the public profile is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
