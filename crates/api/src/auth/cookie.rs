//! The `token` cookie: reading it from requests and building `Set-Cookie`
//! values for login and logout.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the cookie carrying the JWT.
pub const TOKEN_COOKIE: &str = "token";

/// Find the non-empty `token` cookie among all `Cookie` headers.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing `token` as an HttpOnly cookie for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value that clears the token cookie immediately.
pub fn expired_cookie() -> String {
    format!("{TOKEN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}
