//! # Spotify Integration Module
//!
//! Typed access to the two Spotify services the web app talks to:
//!
//! - the accounts service ([`auth`]): authorize URL, PKCE code exchange and
//!   token refresh,
//! - the Web API ([`player`], [`playlist`]) through a [`SpotifyClient`] bound
//!   to the access token taken from the user's session cookie.
//!
//! ```text
//! api handlers
//!      ↓
//! SpotifyClient (bearer token, base url)
//!      ↓
//! reqwest ──▶ api.spotify.com / accounts.spotify.com
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - current user, needed to create playlists
//! - `GET /me/player/currently-playing`
//! - `GET /me/player/recently-played`
//! - `POST /users/{user_id}/playlists`
//! - `POST /playlists/{playlist_id}/tracks` - in chunks of 100 URIs
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Errors
//!
//! Every call returns [`crate::error::SpotifyError`]. Non-success statuses
//! carry the message Spotify put in the error body. There is no retry: the
//! handlers decide how a failure reaches the browser.

pub mod auth;
mod client;
pub mod player;
pub mod playlist;

pub use client::{SpotifyClient, ensure_success, error_message, send_json};
