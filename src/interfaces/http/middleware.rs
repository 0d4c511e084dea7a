//! Authentication and authorization middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use super::common::ApiResponse;
use crate::application::Actor;
use crate::domain::MemberRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    AdminRequired,
}

/// State for `auth_middleware`
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// The caller, as proven by a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let role = claims.role.parse().ok()?;
        Some(Self {
            member_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// Admins may act on anyone, members only on themselves.
    pub fn can_access(&self, member_id: &str) -> bool {
        self.is_admin() || self.member_id == member_id
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.member_id.clone(), self.role)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT bearer authentication. Puts an `AuthenticatedUser` into the request
/// extensions.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let user = verify_token(token, &auth_state.jwt_config)
        .ok()
        .and_then(AuthenticatedUser::from_claims);
    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => auth_error_response(AuthError::InvalidToken),
    }
}

/// Role gate for admin-only routes. Must run after `auth_middleware`.
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>() else {
        return auth_error_response(AuthError::MissingToken);
    };

    if !user.is_admin() {
        warn!(
            member_id = %user.member_id,
            path = %request.uri().path(),
            "Admin route refused"
        );
        return auth_error_response(AuthError::AdminRequired);
    }

    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        AuthError::AdminRequired => (StatusCode::FORBIDDEN, "Admin access required"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
