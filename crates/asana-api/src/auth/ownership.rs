//! Account ownership guard
//!
//! Account deletion is self-service only: the caller must be the account
//! being deleted. There is no admin override on this path.

use super::middleware::CurrentUser;
use asana_core::models::User;
use thiserror::Error;

/// Ownership authorization failures
#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error("You can only delete your own account")]
    Forbidden,
}

/// Authorize deletion of `target` by `caller`
///
/// Compares the resolved identities, never client-supplied fields. The
/// caller's admin flag grants nothing here.
pub fn authorize_self_delete(caller: &CurrentUser, target: &User) -> Result<(), OwnershipError> {
    if target.id == Some(caller.id) {
        Ok(())
    } else {
        Err(OwnershipError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64) -> User {
        User {
            id: Some(id),
            email: format!("user{id}@studio.com"),
            first_name: "Sam".to_string(),
            last_name: "Lechasseur".to_string(),
            password_hash: "hash".to_string(),
            admin: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn caller(id: i64, admin: bool) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("user{id}@studio.com"),
            first_name: "Sam".to_string(),
            last_name: "Lechasseur".to_string(),
            admin,
        }
    }

    #[test]
    fn test_self_delete_allowed() {
        assert!(authorize_self_delete(&caller(1, false), &user(1)).is_ok());
    }

    #[test]
    fn test_other_account_forbidden() {
        let result = authorize_self_delete(&caller(2, false), &user(1));
        assert!(matches!(result, Err(OwnershipError::Forbidden)));
    }

    #[test]
    fn test_admin_flag_grants_nothing() {
        let result = authorize_self_delete(&caller(2, true), &user(1));
        assert!(matches!(result, Err(OwnershipError::Forbidden)));
    }
}
