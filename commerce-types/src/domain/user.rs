//! User account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id;

entity_id! {
    /// Unique identifier for a User.
    UserId
}

/// A registered account.
///
/// The password is stored only as an irreversible salted digest produced
/// by the `PasswordHasher` port; the digest never appears in responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Authorization role, defaults to "USER"
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the default role.
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            role: "USER".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Reconstructs a user from database fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        role: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            first_name,
            last_name,
            role,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_to_user_role() {
        let user = User::new(
            "alice@example.com".to_string(),
            "$argon2id$stub".to_string(),
            "Alice".to_string(),
            "Smith".to_string(),
        );

        assert_eq!(user.role, "USER");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "alice@example.com".to_string(),
            "$argon2id$stub".to_string(),
            "Alice".to_string(),
            "Smith".to_string(),
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$argon2id$stub"));
    }
}
