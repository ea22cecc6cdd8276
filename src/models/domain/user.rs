use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

pub const DEFAULT_AUTH_PROVIDER: &str = "email";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub public_id: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    pub role: UserRole,
    pub auth_provider: String,
    pub audit: Audit,
}

impl User {
    pub fn new(id: i64, email: &str, password_hash: String, role: UserRole) -> Self {
        User {
            id,
            public_id: new_public_id(),
            email: email.trim().to_lowercase(),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            contact: String::new(),
            role,
            auth_provider: DEFAULT_AUTH_PROVIDER.to_string(),
            audit: Audit::new(None),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(id: i64, email: &str) -> Self {
        User::new(id, email, "not-a-real-hash".to_string(), UserRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation_normalizes_email() {
        let user = User::new(1, "  John@Example.com ", "hash".to_string(), UserRole::User);
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.auth_provider, "email");
        assert!(user.audit.active_status);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_role_rejects_unknown_variant() {
        assert!(serde_json::from_str::<UserRole>("\"ROOT\"").is_err());
    }
}
