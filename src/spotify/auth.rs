use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::Config,
    error::SpotifyError,
    spotify::client::send_json,
    types::{Token, TokenResponse},
};

/// Builds the Spotify authorize URL for the PKCE authorization code flow.
///
/// The user is sent here by the login route. After granting access Spotify
/// redirects back to `config.redirect_uri` with `code` and the unchanged
/// `state`.
///
/// # Example
///
/// ```
/// let verifier = utils::generate_code_verifier();
/// let challenge = utils::generate_code_challenge(&verifier);
/// let url = authorize_url(&config, &challenge, &utils::generate_state())?;
/// ```
pub fn authorize_url(
    config: &Config,
    code_challenge: &str,
    state: &str,
) -> Result<Url, SpotifyError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| SpotifyError::Unexpected(format!("invalid authorize url: {}", e)))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorize request. Codes are single-use and expire after a few minutes.
///
/// # Errors
///
/// Returns [`SpotifyError::Status`] when the accounts service rejects the
/// code (e.g. `invalid_grant`), or [`SpotifyError::Request`] on network and
/// decoding failures.
pub async fn exchange_code_pkce(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, SpotifyError> {
    let request = http.post(&config.token_url).form(&[
        ("grant_type", "authorization_code"),
        ("client_id", config.client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", config.redirect_uri.as_str()),
    ]);

    let res: TokenResponse = send_json(request).await?;
    Ok(into_token(res, None))
}

/// Refreshes an expired access token.
///
/// Spotify may rotate the refresh token. When the response carries none, the
/// one passed in stays valid and is kept on the returned token.
pub async fn refresh_token(
    http: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, SpotifyError> {
    let request = http.post(&config.token_url).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.client_id.as_str()),
    ]);

    let res: TokenResponse = send_json(request).await?;
    Ok(into_token(res, Some(refresh_token)))
}

fn into_token(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string)),
        scope: res.scope,
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
