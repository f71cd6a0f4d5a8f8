//! User management and authentication.
//!
//! HTTP handlers stay thin and delegate here.

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use tracing::{info, warn};

use crate::application::access::{require_admin, require_principal};
use crate::application::lister::Lister;
use crate::domain::user::{normalize_email, User, UserDraft, UserRole};
use crate::domain::{AccessGuard, DomainError, DomainResult, Principal, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};
use crate::shared::PageResult;

/// Returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Seed account created at start-up when no admin exists.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    lister: Lister<User>,
    guests: Lister<User>,
    jwt_config: JwtConfig,
    password_cost: u32,
    decoy_hash: OnceLock<String>,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        lister: Lister<User>,
        guests: Lister<User>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            repos,
            lister,
            guests,
            jwt_config,
            password_cost: bcrypt::DEFAULT_COST,
            decoy_hash: OnceLock::new(),
        }
    }

    /// bcrypt cost override; tests use the minimum.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_email(&normalize_email(email)).await? else {
            // unknown accounts still pay for one verify at the configured cost
            let _ = verify_password(password, self.decoy_hash());
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = %user.id, "failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&principal_of(&user), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "user logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Throwaway hash at `password_cost`, built on first use.
    pub(crate) fn decoy_hash(&self) -> &str {
        self.decoy_hash
            .get_or_init(|| {
                let seed = uuid::Uuid::new_v4().to_string();
                hash_password_with_cost(&seed, self.password_cost).unwrap_or_default()
            })
            .as_str()
    }

    /// Creates the seed admin unless an admin already exists. Returns
    /// whether one was created.
    pub async fn ensure_default_admin(&self, admin: &DefaultAdmin) -> DomainResult<bool> {
        if self.repos.users().count_by_role(UserRole::Admin).await? > 0 {
            return Ok(false);
        }
        let draft = UserDraft {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password: Some(admin.password.clone()),
            role: UserRole::Admin,
            bio: None,
            avatar_urls: Vec::new(),
        };
        draft.validate(true)?;
        if self
            .repos
            .users()
            .find_by_email(&draft.normalized_email())
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Default admin e-mail is taken by a non-admin user".into(),
            ));
        }

        let hash = self.hash(&admin.password)?;
        let user = User::new(draft, hash, "system", Utc::now());
        let saved = self.repos.users().save(user).await?;
        info!(user_id = %saved.id, email = %saved.email, "default admin created");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<User>> {
        self.lister.list(guard, &self.lister.request(query, page)).await
    }

    /// Users with the guest role, for booking forms.
    pub async fn guests(
        &self,
        guard: &dyn AccessGuard,
        query: &str,
        page: u32,
    ) -> DomainResult<PageResult<User>> {
        self.guests.list(guard, &self.guests.request(query, page)).await
    }

    pub async fn options(&self, guard: &dyn AccessGuard) -> DomainResult<Vec<User>> {
        self.lister.options(guard).await
    }

    pub async fn get(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<User> {
        require_principal(guard).await?;
        self.find(id).await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, guard: &dyn AccessGuard, draft: UserDraft) -> DomainResult<User> {
        let principal = require_admin(guard).await?;
        draft.validate(true)?;
        self.ensure_email_free(&draft.normalized_email(), None).await?;

        let password = draft.password.as_deref().unwrap_or_default();
        let hash = self.hash(password)?;
        let saved = self
            .repos
            .users()
            .save(User::new(draft, hash, &principal.email, Utc::now()))
            .await?;
        info!(user_id = %saved.id, role = %saved.role, "user created");
        Ok(saved)
    }

    /// Admins may edit anyone; other users only themselves, without
    /// changing their role.
    pub async fn update(
        &self,
        guard: &dyn AccessGuard,
        id: &str,
        draft: UserDraft,
    ) -> DomainResult<User> {
        let principal = require_principal(guard).await?;
        if !principal.is_admin() && principal.id != id {
            return Err(DomainError::Forbidden("You can only edit your own profile".into()));
        }
        draft.validate(false)?;

        let mut user = self.find(id).await?;
        if !principal.is_admin() && draft.role != user.role {
            return Err(DomainError::Forbidden("Only administrators can change roles".into()));
        }
        self.ensure_email_free(&draft.normalized_email(), Some(id)).await?;

        let hash = match draft.password.as_deref() {
            Some(p) => Some(self.hash(p)?),
            None => None,
        };
        user.apply(draft, hash, &principal.email, Utc::now());
        let saved = self.repos.users().update(user).await?;
        info!(user_id = %saved.id, "user updated");
        Ok(saved)
    }

    pub async fn delete(&self, guard: &dyn AccessGuard, id: &str) -> DomainResult<()> {
        let principal = require_admin(guard).await?;
        if principal.id == id {
            return Err(DomainError::Validation("You cannot delete your own account".into()));
        }
        self.find(id).await?;
        self.repos.users().delete(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn ensure_email_free(&self, email: &str, except_id: Option<&str>) -> DomainResult<()> {
        match self.repos.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(DomainError::Conflict("Email already exists".into()))
            }
            _ => Ok(()),
        }
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password_with_cost(password, self.password_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }
}

pub fn principal_of(user: &User) -> Principal {
    Principal {
        id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
    }
}
