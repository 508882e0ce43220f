//! Error types shared by the Spotify client and the HTTP handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::types::ErrorBody;

/// Failure talking to Spotify (accounts service or Web API).
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Transport failure, or a body that could not be decoded.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Spotify answered with a non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response was well formed but unusable.
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// Error surfaced to the browser as a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Spotify access token not found in cookies")]
    MissingToken,

    #[error("Spotify refresh token not found in cookies")]
    MissingRefreshToken,

    #[error("OAuth state mismatch")]
    StateMismatch,

    #[error("{0}")]
    BadRequest(String),

    /// Upstream failure on the track routes, rendered with an empty track list.
    #[error("{0}")]
    TrackFetch(&'static str),

    /// Any other upstream failure.
    #[error("{0}")]
    Upstream(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::MissingRefreshToken => StatusCode::UNAUTHORIZED,
            ApiError::StateMismatch | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TrackFetch(_) | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let tracks = match self {
            ApiError::TrackFetch(_) => Some(Vec::new()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            tracks,
        };
        (self.status_code(), Json(body)).into_response()
    }
}
