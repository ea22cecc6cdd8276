use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_owner_or_admin(claims: &Claims, owner_id: i64) -> AppResult<()> {
    if !claims.is_admin() && claims.user_id() != owner_id {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{User, UserRole};

    fn create_test_claims(id: i64, role: UserRole) -> Claims {
        let user = User::new(id, &format!("user{}@example.com", id), "hash".to_string(), role);
        Claims::new(&user, 1)
    }

    #[test]
    fn test_require_admin_success() {
        let claims = create_test_claims(1, UserRole::Admin);
        assert!(require_admin(&claims).is_ok());
    }

    #[test]
    fn test_require_admin_failure_is_forbidden() {
        let claims = create_test_claims(2, UserRole::User);
        assert!(matches!(require_admin(&claims), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_require_owner_or_admin_as_owner() {
        let claims = create_test_claims(5, UserRole::User);
        assert!(require_owner_or_admin(&claims, 5).is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_as_admin() {
        let claims = create_test_claims(1, UserRole::Admin);
        assert!(require_owner_or_admin(&claims, 99).is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_failure() {
        let claims = create_test_claims(5, UserRole::User);
        assert!(matches!(
            require_owner_or_admin(&claims, 6),
            Err(AppError::Forbidden(_))
        ));
    }
}
