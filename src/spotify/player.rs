use reqwest::StatusCode;

use crate::{
    error::SpotifyError,
    spotify::client::{SpotifyClient, ensure_success, send_json},
    types::{CurrentlyPlayingResponse, RecentlyPlayedResponse, Track},
};

/// What the user's player reports right now.
#[derive(Debug, Clone)]
pub enum NowPlaying {
    Playing(Track),
    /// 204 No Content, or a playback state without an item.
    Idle,
}

/// Fetches the item currently playing on the user's account.
///
/// Calls `GET /me/player/currently-playing`. A 204 response means nothing is
/// playing. Non-success statuses come back as [`SpotifyError::Status`] so the
/// caller can tell them apart from transport and decoding failures.
pub async fn currently_playing(client: &SpotifyClient) -> Result<NowPlaying, SpotifyError> {
    let url = client.endpoint(&["me", "player", "currently-playing"])?;
    let res = client.get(url).send().await?;

    if res.status() == StatusCode::NO_CONTENT {
        return Ok(NowPlaying::Idle);
    }

    let body: CurrentlyPlayingResponse = ensure_success(res).await?.json().await?;
    Ok(match body.item {
        Some(track) => NowPlaying::Playing(track),
        None => NowPlaying::Idle,
    })
}

/// Fetches the user's most recently played tracks, newest first.
///
/// `limit` is passed through as-is; the Web API accepts 1 to 50.
pub async fn recently_played(
    client: &SpotifyClient,
    limit: u32,
) -> Result<Vec<Track>, SpotifyError> {
    let mut url = client.endpoint(&["me", "player", "recently-played"])?;
    url.query_pairs_mut().append_pair("limit", &limit.to_string());

    let body: RecentlyPlayedResponse = send_json(client.get(url)).await?;
    Ok(body.items.into_iter().map(|item| item.track).collect())
}
