//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use waymark_core::error::CoreError;
use waymark_core::types::DbId;
use waymark_db::models::user::UserResponse;
use waymark_db::repositories::UserRepo;

use crate::auth::cookie::token_from_cookies;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

pub const MSG_NOT_LOGGED_IN: &str = "You need to log in to perform this action";
pub const MSG_INVALID_TOKEN: &str = "Unauthorized access";
pub const MSG_USER_GONE: &str = "No user found with this token";

/// Authenticated user resolved from a JWT.
///
/// The token is taken from `Authorization: Bearer <token>` when present,
/// otherwise from the `token` cookie. The user row is loaded on every
/// request, so a token for a deleted user is rejected.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Public profile of the caller.
    pub user: UserResponse,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_token(&parts.headers)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_NOT_LOGGED_IN.into())))?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::Core(CoreError::Unauthorized(MSG_INVALID_TOKEN.into())))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_USER_GONE.into())))?;

        Ok(AuthUser {
            user_id: user.id,
            user: UserResponse::from(&user),
        })
    }
}

/// Bearer token from the `Authorization` header, falling back to the cookie.
fn request_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| token_from_cookies(headers))
}
