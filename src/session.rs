//! Session cookies.
//!
//! The browser holds the whole session: the Spotify access and refresh tokens
//! after login, and the PKCE verifier plus OAuth state while a login is in
//! flight. All cookies are HttpOnly, `SameSite=Lax` and scoped to `/`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::{error::ApiError, types::Token};

pub const ACCESS_TOKEN_COOKIE: &str = "spotify_access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "spotify_refresh_token";
pub const CODE_VERIFIER_COOKIE: &str = "spotify_code_verifier";
pub const AUTH_STATE_COOKIE: &str = "spotify_auth_state";

/// Lifetime of the cookies that carry a login in progress.
pub const PENDING_LOGIN_MAX_AGE: Duration = Duration::minutes(10);
pub const REFRESH_TOKEN_MAX_AGE: Duration = Duration::days(30);

/// Builds an HttpOnly, `SameSite=Lax` cookie scoped to the whole site.
///
/// # Arguments
///
/// * `name` - One of the cookie name constants in this module
/// * `value` - Raw cookie value
/// * `max_age` - Lifetime sent as `Max-Age`
/// * `secure` - Adds the `Secure` attribute, see `Config::cookie_secure`
///
/// # Example
///
/// ```
/// let cookie = build_cookie(ACCESS_TOKEN_COOKIE, token, Duration::hours(1), false);
/// ```
pub fn build_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

fn non_empty(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The bearer token forwarded to the Web API.
pub fn access_token(jar: &CookieJar) -> Result<String, ApiError> {
    non_empty(jar, ACCESS_TOKEN_COOKIE).ok_or(ApiError::MissingToken)
}

pub fn refresh_token(jar: &CookieJar) -> Result<String, ApiError> {
    non_empty(jar, REFRESH_TOKEN_COOKIE).ok_or(ApiError::MissingRefreshToken)
}

/// Verifier and state stored by the login redirect.
pub fn pending_login(jar: &CookieJar) -> Option<(String, String)> {
    Some((
        non_empty(jar, CODE_VERIFIER_COOKIE)?,
        non_empty(jar, AUTH_STATE_COOKIE)?,
    ))
}

/// Stores the PKCE verifier and the OAuth `state` for the callback to check.
///
/// Both cookies expire after [`PENDING_LOGIN_MAX_AGE`]; a login that is not
/// finished within that window has to start over.
pub fn start_login(jar: CookieJar, verifier: String, state: String, secure: bool) -> CookieJar {
    jar.add(build_cookie(
        CODE_VERIFIER_COOKIE,
        verifier,
        PENDING_LOGIN_MAX_AGE,
        secure,
    ))
    .add(build_cookie(
        AUTH_STATE_COOKIE,
        state,
        PENDING_LOGIN_MAX_AGE,
        secure,
    ))
}

pub fn finish_login(jar: CookieJar) -> CookieJar {
    jar.remove(removal(CODE_VERIFIER_COOKIE))
        .remove(removal(AUTH_STATE_COOKIE))
}

/// Stores the token pair. The access cookie expires together with the token.
pub fn store_token(jar: CookieJar, token: &Token, secure: bool) -> CookieJar {
    let jar = jar.add(build_cookie(
        ACCESS_TOKEN_COOKIE,
        token.access_token.clone(),
        Duration::seconds(token.expires_in as i64),
        secure,
    ));

    match &token.refresh_token {
        Some(refresh) => jar.add(build_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh.clone(),
            REFRESH_TOKEN_MAX_AGE,
            secure,
        )),
        None => jar,
    }
}

/// Removes the access and refresh tokens and any pending login.
pub fn clear(jar: CookieJar) -> CookieJar {
    finish_login(jar)
        .remove(removal(ACCESS_TOKEN_COOKIE))
        .remove(removal(REFRESH_TOKEN_COOKIE))
}
