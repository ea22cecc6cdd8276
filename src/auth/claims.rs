use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::{User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // internal user id, decimal
    pub public_id: String,
    pub email: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
    #[serde(skip)]
    user_id: i64,
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.id.to_string(),
            public_id: user.public_id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
            user_id: user.id,
        }
    }

    /// Restores the numeric id from `sub` after decoding. Returns `None` when
    /// the subject is not an integer.
    pub(crate) fn resolve_subject(mut self) -> Option<Self> {
        self.user_id = self.sub.parse().ok()?;
        Some(self)
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Value recorded in `audit.modified_by` for changes made by this caller.
    pub fn actor_name(&self) -> Option<String> {
        Some(self.email.clone())
    }
}
