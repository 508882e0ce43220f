use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::ApiError,
    server::AppState,
    session,
    spotify::{self, SpotifyClient},
    success,
    types::{
        AddTracks, AddTracksResult, CreatePlaylistRequest, ExportSongs, NewPlaylist, Playlist,
        PublishPlaylist, PublishedPlaylist,
    },
    utils, warning,
};

const CREATE_FAILED: &str = "Failed to create playlist";
const ADD_FAILED: &str = "Failed to add tracks to playlist";

/// Creates an empty private playlist for the logged in user.
pub async fn create_playlist(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<NewPlaylist>,
) -> Result<Json<Playlist>, ApiError> {
    let token = session::access_token(&jar)?;
    let name = playlist_name(&body.name)?;

    let request = CreatePlaylistRequest {
        description: body
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| utils::default_playlist_description(&name)),
        name,
        public: body.public.unwrap_or(false),
        collaborative: false,
    };

    let playlist = create(&state.spotify(token), &request).await?;
    Ok(Json(playlist))
}

/// Appends track URIs to an existing playlist.
pub async fn add_tracks(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(playlist_id): Path<String>,
    Json(body): Json<AddTracks>,
) -> Result<Json<AddTracksResult>, ApiError> {
    let token = session::access_token(&jar)?;

    if playlist_id.is_empty() || !playlist_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::BadRequest("Invalid playlist id".to_string()));
    }
    if body.uris.is_empty() {
        return Err(ApiError::BadRequest("No track URIs provided".to_string()));
    }
    if let Some(bad) = body.uris.iter().find(|uri| !utils::is_playable_uri(uri)) {
        return Err(ApiError::BadRequest(format!("Invalid track URI: {}", bad)));
    }

    let result = add(&state.spotify(token), &playlist_id, &body.uris).await?;
    Ok(Json(result))
}

/// Creates a playlist from recommended songs and fills it in one request.
///
/// Songs without a Spotify match are skipped. When none match, the playlist
/// is still created and left empty.
pub async fn publish(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<PublishPlaylist>,
) -> Result<Json<PublishedPlaylist>, ApiError> {
    let token = session::access_token(&jar)?;
    let name = playlist_name(&body.name)?;
    let uris = utils::track_uris(&body.songs);
    let client = state.spotify(token);

    let request = CreatePlaylistRequest {
        description: utils::default_playlist_description(&name),
        name,
        public: false,
        collaborative: false,
    };
    let playlist = create(&client, &request).await?;

    let snapshot_id = if uris.is_empty() {
        None
    } else {
        Some(add(&client, &playlist.id, &uris).await?.snapshot_id)
    };

    success!(
        "Published playlist {} with {} of {} songs",
        playlist.name,
        uris.len(),
        body.songs.len()
    );

    Ok(Json(PublishedPlaylist {
        id: playlist.id,
        name: playlist.name,
        snapshot_id,
        added: uris.len(),
    }))
}

/// Renders songs as plain text, ready for the clipboard.
pub async fn export(Json(body): Json<ExportSongs>) -> String {
    utils::format_song_list(&body.songs)
}

fn playlist_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "Playlist name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

async fn create(
    client: &SpotifyClient,
    request: &CreatePlaylistRequest,
) -> Result<Playlist, ApiError> {
    let playlist = spotify::playlist::create_for_current_user(client, request)
        .await
        .map_err(|e| {
            warning!("Error creating playlist {}: {}", request.name, e);
            ApiError::Upstream(CREATE_FAILED)
        })?;

    success!("Playlist {} created ({})", playlist.name, playlist.id);
    Ok(playlist)
}

async fn add(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksResult, ApiError> {
    spotify::playlist::add_tracks(client, playlist_id, uris)
        .await
        .map_err(|e| {
            warning!("Error adding tracks to playlist {}: {}", playlist_id, e);
            ApiError::Upstream(ADD_FAILED)
        })
}
