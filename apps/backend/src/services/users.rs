//! User provisioning for token-based login.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::users;
use crate::repos::users::User;

/// Ensures a user exists for an external login, creating one if necessary.
/// This function is idempotent - calling it multiple times with the same
/// email returns the same user without creating duplicates.
///
/// New users always get the `user` role; elevated roles are granted out of
/// band by an operator.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: Option<&str>,
    google_sub: &str,
) -> Result<User, DomainError> {
    match users::find_by_email(conn, email).await? {
        Some(user) => {
            if user.sub != google_sub {
                warn!(
                    user_id = user.id,
                    incoming_sub = %redact_sub(google_sub),
                    existing_sub = %redact_sub(&user.sub),
                    "login sub mismatch detected"
                );
                return Err(DomainError::conflict(
                    ConflictKind::AccountLink,
                    "This email is already linked to a different Google account. Please use the original Google account or contact support.",
                ));
            }

            let user = users::touch_login(conn, user.id).await?;
            debug!(user_id = user.id, "repeat login for existing user");
            Ok(user)
        }
        None => {
            let username = derive_username(name, email);
            let user = users::create_user(conn, google_sub, username.as_deref(), email).await?;
            info!(user_id = user.id, "first user creation");
            Ok(user)
        }
    }
}

/// Redacts an external subject identifier for logging purposes.
/// Shows only the first 4 characters followed by asterisks.
fn redact_sub(sub: &str) -> String {
    if sub.len() <= 4 {
        "*".repeat(sub.len())
    } else {
        format!("{}***", &sub[..4])
    }
}

/// Derives a username from the provided name or email local-part.
/// Returns None if no suitable username can be derived.
fn derive_username(name: Option<&str>, email: &str) -> Option<String> {
    if let Some(name) = name {
        let clean_name = name.trim();
        if !clean_name.is_empty() {
            return Some(clean_name.to_string());
        }
    }

    // Fall back to email local-part (before @)
    if let Some(at_pos) = email.find('@') {
        let local_part = &email[..at_pos];
        if !local_part.is_empty() {
            return Some(local_part.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{derive_username, redact_sub};

    #[test]
    fn username_prefers_provided_name() {
        assert_eq!(
            derive_username(Some("Jo Park"), "jo@example.com"),
            Some("Jo Park".to_string())
        );
    }

    #[test]
    fn username_falls_back_to_email_local_part() {
        assert_eq!(
            derive_username(None, "jo.park@example.com"),
            Some("jo.park".to_string())
        );
        assert_eq!(
            derive_username(Some("   "), "jo@example.com"),
            Some("jo".to_string())
        );
    }

    #[test]
    fn username_none_when_nothing_usable() {
        assert_eq!(derive_username(None, "@example.com"), None);
        assert_eq!(derive_username(None, "no-at-sign"), None);
    }

    #[test]
    fn sub_redaction_keeps_prefix_only() {
        assert_eq!(redact_sub("abcdef123"), "abcd***");
        assert_eq!(redact_sub("ab"), "**");
    }
}
