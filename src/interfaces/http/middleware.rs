//! Authentication middleware for Axum
//!
//! Every API route runs behind `optional_auth_middleware`: a valid bearer
//! token attaches an `AuthenticatedUser`, anything else passes through
//! anonymously. Handlers decide what anonymous callers get through the
//! `RequestGuard` extractor.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domain::{AccessGuard, Principal};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Stored in request extensions once a token verifies.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub principal: Principal,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub fn authenticate(auth_header: &str, jwt_config: &JwtConfig) -> Option<AuthenticatedUser> {
    let token = extract_token(auth_header)?;
    match verify_token(token, jwt_config) {
        Ok(claims) if !claims.is_expired() => Some(AuthenticatedUser {
            principal: claims.principal(),
        }),
        Ok(_) => {
            debug!("expired token ignored");
            None
        }
        Err(e) => {
            debug!(error = %e, "invalid token ignored");
            None
        }
    }
}

pub async fn optional_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| authenticate(h, &auth_state.jwt_config));

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

/// Per-request `AccessGuard`. Never rejects; `None` means anonymous.
#[derive(Clone, Debug, Default)]
pub struct RequestGuard(pub Option<Principal>);

impl<S: Send + Sync> FromRequestParts<S> for RequestGuard {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestGuard(
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .map(|u| u.principal.clone()),
        ))
    }
}

#[async_trait]
impl AccessGuard for RequestGuard {
    async fn principal(&self) -> Option<Principal> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::infrastructure::crypto::jwt::create_token;

    fn principal() -> Principal {
        Principal {
            id: "u-7".into(),
            email: "desk@hotel.local".into(),
            name: "Front Desk".into(),
            role: UserRole::Staff,
        }
    }

    #[test]
    fn bearer_token_authenticates() {
        let config = JwtConfig::default();
        let token = create_token(&principal(), &config).unwrap();
        let user = authenticate(&format!("Bearer {}", token), &config).unwrap();
        assert_eq!(user.principal, principal());
    }

    #[test]
    fn other_schemes_and_garbage_are_anonymous() {
        let config = JwtConfig::default();
        assert!(authenticate("Basic dXNlcjpwYXNz", &config).is_none());
        assert!(authenticate("Bearer ", &config).is_none());
        assert!(authenticate("Bearer not.a.jwt", &config).is_none());
    }

    #[test]
    fn token_from_another_secret_is_anonymous() {
        let token = create_token(&principal(), &JwtConfig::default()).unwrap();
        let other = JwtConfig {
            secret: "rotated".into(),
            ..JwtConfig::default()
        };
        assert!(authenticate(&format!("Bearer {}", token), &other).is_none());
    }
}
