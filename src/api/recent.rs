use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    error::{ApiError, SpotifyError},
    server::AppState,
    session,
    spotify::{
        SpotifyClient,
        player::{self, NowPlaying},
    },
    types::RecentTracks,
    utils, warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<u32>,
}

/// Returns the track playing now, or the most recently played ones.
///
/// Falls back to the play history when nothing is playing (204 or an empty
/// playback state) and when the player endpoint answers with an error
/// status. Transport and decoding failures end the request instead.
pub async fn recent(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<RecentParams>,
) -> Result<Json<RecentTracks>, ApiError> {
    let token = session::access_token(&jar)?;
    let client = state.spotify(token);

    match player::currently_playing(&client).await {
        Ok(NowPlaying::Playing(track)) => {
            return Ok(Json(RecentTracks {
                tracks: vec![track],
                is_currently_playing: true,
            }));
        }
        Ok(NowPlaying::Idle) => {}
        Err(e @ SpotifyError::Status { .. }) => {
            warning!("Currently playing unavailable, using recently played: {}", e);
        }
        Err(e) => {
            warning!("Error fetching track: {}", e);
            return Err(ApiError::TrackFetch("Failed to fetch track"));
        }
    }

    recently_played(&client, utils::clamp_history_limit(params.limit)).await
}

async fn recently_played(
    client: &SpotifyClient,
    limit: u32,
) -> Result<Json<RecentTracks>, ApiError> {
    let tracks = player::recently_played(client, limit).await.map_err(|e| {
        warning!("Error fetching recently played tracks: {}", e);
        ApiError::TrackFetch("Failed to fetch recently played tracks")
    })?;

    Ok(Json(RecentTracks {
        tracks,
        is_currently_playing: false,
    }))
}
