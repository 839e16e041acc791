//! `AuthUser` extractor. Pulls the JWT from the Authorization header and validates it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use leasehub_core::error::AppError;
use leasehub_core::types::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Subject of the verified token.
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token.trim())?;

        Ok(Self {
            user_id: claims.user_id(),
        })
    }
}
