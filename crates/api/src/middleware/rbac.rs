//! Role-based access control extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the role is not
//! sufficient, so handler signatures state their access rule.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use scholarship_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Any authenticated caller.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Requires `officer` or `admin`.
pub struct RequireOfficer(pub AuthUser);

impl FromRequestParts<AppState> for RequireOfficer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Officer or Admin role required".into(),
            )));
        }
        Ok(RequireOfficer(user))
    }
}
