use crate::{
    error::SpotifyError,
    spotify::client::{SpotifyClient, send_json},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, AddTracksResult,
        CreatePlaylistRequest, CurrentUser, Playlist,
    },
};

/// Maximum number of URIs the Web API accepts per add-items request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Returns the profile of the user owning the access token.
pub async fn current_user(client: &SpotifyClient) -> Result<CurrentUser, SpotifyError> {
    let url = client.endpoint(&["me"])?;
    send_json(client.get(url)).await
}

/// Creates a playlist owned by `user_id`.
pub async fn create(
    client: &SpotifyClient,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> Result<Playlist, SpotifyError> {
    let url = client.endpoint(&["users", user_id, "playlists"])?;
    send_json(client.post(url).json(request)).await
}

/// Creates a playlist for the current user.
///
/// Resolves the user id with `GET /me` first, since the create endpoint is
/// scoped by user.
pub async fn create_for_current_user(
    client: &SpotifyClient,
    request: &CreatePlaylistRequest,
) -> Result<Playlist, SpotifyError> {
    let user = current_user(client).await?;
    create(client, &user.id, request).await
}

/// Appends `uris` to the playlist, preserving their order.
///
/// URIs are sent in chunks of [`MAX_TRACKS_PER_REQUEST`], one request after
/// the other. The first failing chunk aborts the remainder; chunks sent before
/// it stay in the playlist. The returned snapshot is the one of the last chunk.
pub async fn add_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<AddTracksResult, SpotifyError> {
    if uris.is_empty() {
        return Err(SpotifyError::Unexpected("no tracks to add".to_string()));
    }

    let url = client.endpoint(&["playlists", playlist_id, "tracks"])?;
    let mut snapshot_id = String::new();

    for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
        let body = AddTrackToPlaylistRequest {
            uris: chunk.to_vec(),
        };
        let res: AddTrackToPlaylistResponse =
            send_json(client.post(url.clone()).json(&body)).await?;
        snapshot_id = res.snapshot_id;
    }

    Ok(AddTracksResult {
        snapshot_id,
        added: uris.len(),
    })
}
