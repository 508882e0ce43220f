use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Song;

const TRACK_URI_PREFIX: &str = "spotify:track:";
const EPISODE_URI_PREFIX: &str = "spotify:episode:";

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorize redirect.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// `spotify:track:<id>` for a bare track id. The id is not validated.
pub fn track_uri(spotify_id: &str) -> String {
    format!("{}{}", TRACK_URI_PREFIX, spotify_id)
}

/// URIs for every song that was matched to a Spotify track, in playlist order.
pub fn track_uris(songs: &[Song]) -> Vec<String> {
    songs
        .iter()
        .filter_map(|song| song.spotify_id.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(track_uri)
        .collect()
}

/// Accepts `spotify:track:<id>` and `spotify:episode:<id>` with an alphanumeric id.
pub fn is_playable_uri(uri: &str) -> bool {
    let id = uri
        .strip_prefix(TRACK_URI_PREFIX)
        .or_else(|| uri.strip_prefix(EPISODE_URI_PREFIX));

    matches!(id, Some(id) if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Renders songs as a numbered list, one `"<n>. <name> - <artist>"` per line.
pub fn format_song_list(songs: &[Song]) -> String {
    songs
        .iter()
        .enumerate()
        .map(|(index, song)| format!("{}. {} - {}", index + 1, song.name, song.artist))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn default_playlist_description(name: &str) -> String {
    format!("Playlist created by AI: {}", name)
}

/// Clamps the requested history size to what the Web API accepts.
pub fn clamp_history_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(1).clamp(1, 50)
}
