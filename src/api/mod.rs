//! # API Module
//!
//! HTTP endpoints of the Spotifind web service. Handlers are thin: they read
//! the session cookie, call into [`crate::spotify`] and map failures to an
//! [`crate::error::ApiError`], whose JSON body is `{ "error": .. }` (plus an
//! empty `tracks` list on the track routes).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /api/spotify/auth`, redirects to Spotify with a PKCE challenge
//! - [`callback`] - `GET /api/spotify/callback`, exchanges the code and sets the token cookies
//! - [`refresh`] - `POST /api/spotify/refresh`
//! - [`logout`] - `GET /api/spotify/logout`
//!
//! ### Listening
//!
//! - [`recent`] - `GET /api/recent`, currently playing with a recently played fallback
//!
//! ### Playlists
//!
//! - [`create_playlist`] - `POST /api/spotify/create-playlist`
//! - [`add_tracks`] - `POST /api/playlists/{id}/add-tracks`
//! - [`publish`] - `POST /api/spotify/publish`, both steps in one call
//! - [`export`] - `POST /api/playlists/export`, numbered plain text list
//!
//! ### Site
//!
//! - [`index`], [`site`], [`health`]

mod auth;
mod health;
mod playlist;
mod recent;
mod site;

pub use auth::{callback, login, logout, refresh};
pub use health::health;
pub use playlist::{add_tracks, create_playlist, export, publish};
pub use recent::recent;
pub use site::{index, site};
