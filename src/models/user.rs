//! Learner account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fallback greeting when neither a display name nor an email local part is usable.
const DEFAULT_GREETING: &str = "User";

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the dashboard greeting: profile name, else email local part.
    pub fn greeting_name(&self) -> String {
        greeting_name(self.display_name.as_deref(), &self.email)
    }
}

/// Resolve the greeting from an optional profile name and the account email.
pub fn greeting_name(display_name: Option<&str>, email: &str) -> String {
    if let Some(name) = display_name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => DEFAULT_GREETING.to_string(),
    }
}

/// User response DTO — excludes password_hash and internal fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>, email: &str) -> User {
        User {
            id: Uuid::nil(),
            email: email.to_string(),
            password_hash: "secret_hash".to_string(),
            display_name: display_name.map(str::to_string),
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn greeting_prefers_display_name() {
        assert_eq!(user(Some("Ada"), "ada@school.test").greeting_name(), "Ada");
    }

    #[test]
    fn greeting_falls_back_to_email_local_part() {
        assert_eq!(user(None, "grace@school.test").greeting_name(), "grace");
        assert_eq!(user(Some(""), "grace@school.test").greeting_name(), "grace");
    }

    #[test]
    fn greeting_keeps_display_name_verbatim() {
        assert_eq!(user(Some("   "), "grace@school.test").greeting_name(), "   ");
        assert_eq!(user(Some(" Ada "), "ada@school.test").greeting_name(), " Ada ");
    }

    #[test]
    fn greeting_falls_back_to_default() {
        assert_eq!(user(None, "@school.test").greeting_name(), "User");
        assert_eq!(user(None, "").greeting_name(), "User");
    }

    #[test]
    fn user_response_excludes_password() {
        let response: UserResponse = user(Some("Ada"), "ada@school.test").into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
        assert_eq!(response.email, "ada@school.test");
    }
}
