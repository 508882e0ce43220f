use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiError, info, server::AppState, session, spotify, utils, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Starts the login: remembers a fresh PKCE verifier and state in cookies and
/// sends the browser to Spotify's authorize page.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let verifier = utils::generate_code_verifier();
    let challenge = utils::generate_code_challenge(&verifier);
    let oauth_state = utils::generate_state();

    let url = spotify::auth::authorize_url(&state.config, &challenge, &oauth_state)
        .map_err(|e| {
            warning!("Cannot build authorize url: {}", e);
            ApiError::Upstream("Failed to start Spotify authorization")
        })?;

    let jar = session::start_login(jar, verifier, oauth_state, state.config.cookie_secure);
    Ok((jar, Redirect::temporary(url.as_str())))
}

/// Completes the login started by [`login`].
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(error) = params.error {
        return Err(ApiError::BadRequest(format!(
            "Spotify authorization failed: {}",
            error
        )));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Missing authorization code".to_string(),
        ));
    };

    let Some((verifier, expected_state)) = session::pending_login(&jar) else {
        return Err(ApiError::StateMismatch);
    };
    if params.state.as_deref() != Some(expected_state.as_str()) {
        return Err(ApiError::StateMismatch);
    }

    let token = spotify::auth::exchange_code_pkce(&state.http, &state.config, &code, &verifier)
        .await
        .map_err(|e| {
            warning!("Token exchange failed: {}", e);
            ApiError::Upstream("Failed to exchange authorization code")
        })?;

    info!("Spotify login completed (scope: {})", token.scope);
    let jar = session::finish_login(jar);
    let jar = session::store_token(jar, &token, state.config.cookie_secure);
    Ok((jar, Redirect::to(&state.config.post_login_redirect)))
}

/// Swaps the refresh cookie for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let refresh_token = session::refresh_token(&jar)?;

    let token = spotify::auth::refresh_token(&state.http, &state.config, &refresh_token)
        .await
        .map_err(|e| {
            warning!("Token refresh failed: {}", e);
            ApiError::Upstream("Failed to refresh access token")
        })?;

    let jar = session::store_token(jar, &token, state.config.cookie_secure);
    Ok((jar, Json(json!({ "expiresIn": token.expires_in }))))
}

/// Drops the session cookies and sends the browser back to the landing page.
///
/// Always succeeds, with or without an active session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (session::clear(jar), Redirect::to("/"))
}
