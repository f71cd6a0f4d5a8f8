use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::audit::Audit;
use crate::shared::{DomainError, DomainResult};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Guest,
    #[serde(alias = "stuff")]
    Staff,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    /// Accepts the legacy spelling `stuff` for staff.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "staff" | "stuff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::Validation("Invalid role".into())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_urls: Vec<String>,
    pub email_verified: bool,
    pub audit: Audit,
}

/// Profile fields shared by create and update. The password is plain text
/// here and hashed by the service.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_urls: Vec<String>,
}

impl UserDraft {
    pub fn validate(&self, password_required: bool) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(DomainError::Validation("Invalid email address".into())),
        }
        match &self.password {
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => Err(DomainError::Validation(
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            )),
            None if password_required => {
                Err(DomainError::Validation("Password is required".into()))
            }
            _ => Ok(()),
        }
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    pub fn new(draft: UserDraft, password_hash: String, by: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: draft.normalized_email(),
            name: draft.name.trim().to_string(),
            password_hash,
            role: draft.role,
            bio: draft.bio,
            avatar_urls: draft.avatar_urls,
            email_verified: false,
            audit: Audit::created(by, now),
        }
    }

    /// `password_hash = None` keeps the current hash.
    pub fn apply(
        &mut self,
        draft: UserDraft,
        password_hash: Option<String>,
        by: &str,
        now: DateTime<Utc>,
    ) {
        let email = draft.normalized_email();
        if email != self.email {
            self.email_verified = false;
        }
        self.email = email;
        self.name = draft.name.trim().to_string();
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        self.role = draft.role;
        self.bio = draft.bio;
        self.avatar_urls = draft.avatar_urls;
        self.audit.touch(by, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            name: "Jane Doe".into(),
            email: " Jane@Example.COM ".into(),
            password: Some("supersecret".into()),
            role: UserRole::Staff,
            bio: None,
            avatar_urls: vec![],
        }
    }

    #[test]
    fn legacy_staff_spelling() {
        assert_eq!("stuff".parse::<UserRole>().unwrap(), UserRole::Staff);
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("sadmin".parse::<UserRole>().is_err());
        let role: UserRole = serde_json::from_str("\"stuff\"").unwrap();
        assert_eq!(role, UserRole::Staff);
    }

    #[test]
    fn password_rules() {
        let mut d = draft();
        assert!(d.validate(true).is_ok());
        d.password = Some("short".into());
        assert!(d.validate(true).is_err());
        d.password = None;
        assert!(d.validate(true).is_err());
        assert!(d.validate(false).is_ok());
    }

    #[test]
    fn email_shape() {
        let mut d = draft();
        d.email = "not-an-email".into();
        assert!(d.validate(true).is_err());
        d.email = "@example.com".into();
        assert!(d.validate(true).is_err());
    }

    #[test]
    fn email_is_normalised() {
        let user = User::new(draft(), "hash".into(), "a@b.c", Utc::now());
        assert_eq!(user.email, "jane@example.com");
        assert!(!user.email_verified);
    }

    #[test]
    fn changing_email_resets_verification() {
        let mut user = User::new(draft(), "hash".into(), "a@b.c", Utc::now());
        user.email_verified = true;

        user.apply(draft(), None, "a@b.c", Utc::now());
        assert!(user.email_verified);
        assert_eq!(user.password_hash, "hash");

        let mut other = draft();
        other.email = "new@example.com".into();
        user.apply(other, Some("hash2".into()), "a@b.c", Utc::now());
        assert!(!user.email_verified);
        assert_eq!(user.password_hash, "hash2");
    }
}
