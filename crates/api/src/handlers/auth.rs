//! Handlers for the `/auth` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use waymark_core::error::CoreError;
use waymark_db::models::user::{CreateUser, UserResponse};
use waymark_db::repositories::UserRepo;

use crate::auth::cookie::{expired_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{check_password_length, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const MSG_MISSING_CREDENTIALS: &str = "Please provide email and password";
const MSG_BAD_CREDENTIALS: &str = "Incorrect email or password";
const MSG_EMAIL_TAKEN: &str = "Email is already registered";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response body for `GET /api/auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and sign the caller in. Returns 201 with a token and
/// sets the `token` cookie.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let username = required(input.username.as_deref(), "Username is required")?;
    let email = required(input.email.as_deref(), "Email is required")?;
    let password = input.password.as_deref().unwrap_or_default();

    if !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Please provide a valid email".into(),
        )));
    }
    check_password_length(password)?;

    // The unique index still backs this up for concurrent registrations.
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(MSG_EMAIL_TAKEN.into())));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let user = UserResponse::from(&user);
    signed_in(&state, StatusCode::CREATED, user)
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns a token and sets the
/// `token` cookie.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        input.email.as_deref().filter(|e| !e.is_empty()),
        input.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            MSG_MISSING_CREDENTIALS.into(),
        )));
    };

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_BAD_CREDENTIALS.into())))?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            MSG_BAD_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    let user = UserResponse::from(&user);
    signed_in(&state, StatusCode::OK, user)
}

/// GET /api/auth/logout
///
/// Clear the `token` cookie. Tokens are stateless, so a copied bearer token
/// stays valid until it expires.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, expired_cookie())],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// GET /api/auth/me
///
/// Return the authenticated caller's profile.
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user: auth.user })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token for `user` and build the response carrying it in both the
/// body and the cookie.
fn signed_in(
    state: &AppState,
    status: StatusCode,
    user: UserResponse,
) -> AppResult<(StatusCode, [(axum::http::HeaderName, String); 1], Json<AuthResponse>)> {
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(&token, state.config.jwt.expiry_secs());

    Ok((status, [(SET_COOKIE, cookie)], Json(AuthResponse { token, user })))
}

/// Trimmed non-empty field value, or a validation error with `message`.
fn required<'a>(value: Option<&'a str>, message: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(message.to_string())))
}
