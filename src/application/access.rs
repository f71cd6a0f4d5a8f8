//! Authorization checks for mutating operations.
//!
//! Reads go through the lister and fail silently; anything that changes
//! state must go through one of these.

use crate::domain::{AccessGuard, DomainError, DomainResult, Principal};

pub async fn require_principal(guard: &dyn AccessGuard) -> DomainResult<Principal> {
    guard
        .principal()
        .await
        .ok_or_else(DomainError::not_authorized)
}

pub async fn require_admin(guard: &dyn AccessGuard) -> DomainResult<Principal> {
    let principal = require_principal(guard).await?;
    if !principal.is_admin() {
        return Err(DomainError::Forbidden(
            "Only administrators can perform this action".into(),
        ));
    }
    Ok(principal)
}
