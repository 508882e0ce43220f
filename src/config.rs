//! Configuration management for Spotifind.
//!
//! Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`<data_local_dir>/spotifind/.env`)
//! 3. Application defaults (where applicable)
//!
//! The static site description served to the front end lives here as well,
//! see [`SiteConfig`].

use serde::Serialize;
use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing user-read-recently-played playlist-modify-public playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_POST_LOGIN_REDIRECT: &str = "/dashboard";

/// Loads environment variables from the `.env` file in the local data directory.
///
/// The parent directory is created when missing so users find the expected
/// location right away. A missing `.env` file is not an error: the service can
/// be configured through the process environment alone.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Location of the optional `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotifind/.env");
    path
}

/// Runtime settings shared by all request handlers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to, e.g. `127.0.0.1:3000`.
    pub server_addr: String,
    pub client_id: String,
    /// Must match a redirect URI registered for the Spotify application.
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Base URL of the Web API without a trailing slash.
    pub api_url: String,
    /// Path the browser is sent to once the login completed.
    pub post_login_redirect: String,
    /// Adds the `Secure` attribute to session cookies.
    pub cookie_secure: bool,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_REDIRECT_URI` are
    /// required, everything else falls back to a default.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server_addr: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: trim_base(var_or("SPOTIFY_API_URL", DEFAULT_API_URL)),
            post_login_redirect: var_or("POST_LOGIN_REDIRECT", DEFAULT_POST_LOGIN_REDIRECT),
            cookie_secure: parse_flag(&var_or("COOKIE_SECURE", "false")),
        })
    }

    /// Configuration with Spotify's public endpoints and the given credentials.
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            post_login_redirect: DEFAULT_POST_LOGIN_REDIRECT.to_string(),
            cookie_secure: false,
        }
    }

    /// Points the accounts service and the Web API at `base`.
    ///
    /// The token endpoint becomes `{base}/api/token`, the authorize endpoint
    /// `{base}/authorize` and the Web API `{base}/v1`.
    pub fn with_spotify_base(mut self, base: &str) -> Self {
        let base = trim_base(base.to_string());
        self.auth_url = format!("{}/authorize", base);
        self.token_url = format!("{}/api/token", base);
        self.api_url = format!("{}/v1", base);
        self
    }
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key)),
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Interprets `1`, `true`, `yes` and `on` (any case) as enabled.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
}

/// Static description of the site, served at `/api/site`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub main_nav: Vec<NavItem>,
}

pub fn site_config() -> SiteConfig {
    SiteConfig {
        name: "Spotifind",
        description: "Create personalized Spotify playlists tailored to your unique taste. Let AI curate your musical journey with intelligent recommendations.",
        main_nav: vec![
            NavItem {
                title: "Next.js",
                href: "/",
            },
            NavItem {
                title: "Million.js",
                href: "/million",
            },
        ],
    }
}
