use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;

use crate::{Res, api, config::Config, info, spotify::SpotifyClient};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
        }
    }

    /// Web API client acting on behalf of the token's owner.
    pub fn spotify(&self, access_token: String) -> SpotifyClient {
        SpotifyClient::new(self.http.clone(), self.config.api_url.clone(), access_token)
    }
}

/// Creates the application router with every route bound to `state`.
///
/// # Arguments
///
/// * `state` - Shared configuration and HTTP client
///
/// # Returns
///
/// A `Router` ready for [`serve`]. Tests mount it on an ephemeral port.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/api/site", get(api::site))
        .route("/api/spotify/auth", get(api::login))
        .route("/api/spotify/callback", get(api::callback))
        .route("/api/spotify/refresh", post(api::refresh))
        .route("/api/spotify/logout", get(api::logout))
        .route("/api/recent", get(api::recent))
        .route("/api/spotify/create-playlist", post(api::create_playlist))
        .route("/api/spotify/publish", post(api::publish))
        .route("/api/playlists/export", post(api::export))
        .route("/api/playlists/{id}/add-tracks", post(api::add_tracks))
        .with_state(state)
}

/// Serves the router on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, AppState::new(config)).await?;
    Ok(())
}
