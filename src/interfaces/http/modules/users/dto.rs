//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{User, UserDraft, UserRole};
use crate::domain::DomainError;

/// User API representation. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    /// guest, staff, manager or admin
    pub role: String,
    pub bio: Option<String>,
    pub avatar_urls: Vec<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            bio: u.bio,
            avatar_urls: u.avatar_urls,
            email_verified: u.email_verified,
            created_at: u.audit.created_at,
            updated_at: u.audit.updated_at,
        }
    }
}

/// Create / update request. `password` may be omitted on update to keep
/// the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_urls: Vec<String>,
}

fn default_role() -> String {
    UserRole::Guest.as_str().to_string()
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = DomainError;

    fn try_from(r: UserRequest) -> Result<Self, Self::Error> {
        Ok(UserDraft {
            role: r.role.parse()?,
            name: r.name,
            email: r.email,
            password: r.password,
            bio: r.bio,
            avatar_urls: r.avatar_urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: &str) -> UserRequest {
        UserRequest {
            name: "Ada".into(),
            email: "ada@hotel.local".into(),
            password: None,
            role: role.into(),
            bio: None,
            avatar_urls: vec![],
        }
    }

    #[test]
    fn legacy_staff_spelling_is_accepted() {
        let draft = UserDraft::try_from(request("stuff")).unwrap();
        assert_eq!(draft.role, UserRole::Staff);
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        assert!(matches!(
            UserDraft::try_from(request("owner")),
            Err(DomainError::Validation(_))
        ));
    }
}
