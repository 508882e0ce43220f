use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SpotifyError;

/// Web API client bound to one user's access token.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Builds `{api_url}/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, SpotifyError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SpotifyError::Unexpected(format!("invalid API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SpotifyError::Unexpected("API url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    pub fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.access_token)
    }
}

/// Sends the request and decodes a successful JSON body.
pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, SpotifyError> {
    let res = ensure_success(request.send().await?).await?;
    Ok(res.json::<T>().await?)
}

/// Turns a non-success response into [`SpotifyError::Status`].
pub async fn ensure_success(res: Response) -> Result<Response, SpotifyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(SpotifyError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Extracts the human readable message from a Spotify error body.
///
/// The Web API nests it as `{"error": {"message": ..}}`, the accounts service
/// uses `{"error": .., "error_description": ..}`. Falls back to the canonical
/// reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Unknown error").to_string();

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    json["error"]["message"]
        .as_str()
        .or_else(|| json["error_description"].as_str())
        .or_else(|| json["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
