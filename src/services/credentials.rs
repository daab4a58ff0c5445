//! Bearer credential extraction.
//!
//! The `Authorization` header is authoritative. Only when it is absent is the
//! token cookie consulted, and in that case the header is synthesised so that
//! downstream handlers find the credential in one place.

use axum::http::{HeaderMap, HeaderValue, header};
use axum_extra::extract::cookie::CookieJar;

pub const BEARER_SCHEME: &str = "Bearer ";

/// Default cookie carrying the token. Its value may repeat the name as a
/// `micro-token=` marker, which is stripped.
pub const TOKEN_COOKIE_NAME: &str = "micro-token";

/// Returns the bearer token of the request, or an empty string when there is
/// none. An empty token is treated as anonymous by the caller.
pub fn extract_token(headers: &mut HeaderMap, cookie_name: &str) -> String {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
    {
        // Compared as raw bytes: obs-text in the token is kept (lossily), not
        // turned into an anonymous request.
        return value
            .as_bytes()
            .strip_prefix(BEARER_SCHEME.as_bytes())
            .map(|token| String::from_utf8_lossy(token).into_owned())
            .unwrap_or_default();
    }

    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(cookie_name) else {
        return String::new();
    };

    let marker = format!("{TOKEN_COOKIE_NAME}=");
    let token = cookie
        .value()
        .strip_prefix(marker.as_str())
        .unwrap_or(cookie.value())
        .to_owned();

    match HeaderValue::from_str(&format!("{BEARER_SCHEME}{token}")) {
        Ok(value) => {
            headers.insert(header::AUTHORIZATION, value);
        }
        Err(err) => {
            tracing::debug!(error = %err, "token cookie is not a valid header value");
        }
    }

    token
}
