//! Double-submit anti-forgery token.
//!
//! The page sets a random token in a cookie and repeats it in a hidden
//! form field; a submission is accepted only when both are present and
//! equal.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use uuid::Uuid;

/// Cookie and form field name.
pub const TOKEN_NAME: &str = "csrf_token";

pub const MISSING_TOKEN: &str = "The CSRF token is missing.";
pub const TOKEN_MISMATCH: &str = "The CSRF tokens do not match.";

/// Generate a fresh token.
pub fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Read the token cookie, ignoring values we could not have issued.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_NAME)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Check a submitted token against the cookie.
pub fn verify(headers: &HeaderMap, submitted: Option<&str>) -> Result<(), &'static str> {
    let submitted = submitted.filter(|s| !s.is_empty()).ok_or(MISSING_TOKEN)?;
    let cookie = token_from_headers(headers).ok_or(MISSING_TOKEN)?;

    if submitted != cookie {
        return Err(TOKEN_MISMATCH);
    }
    Ok(())
}

/// Set the token cookie on a response.
pub fn attach_cookie(response: &mut Response, token: &str) {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Strict", TOKEN_NAME, token);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(SET_COOKIE, value);
    }
}
