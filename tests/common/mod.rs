#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::redirect::Policy;
use serde_json::{Value, json};
use spotifind::{
    config::Config,
    server::{self, AppState},
};
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "test-client";
pub const REDIRECT_URI: &str = "http://127.0.0.1:3000/api/spotify/callback";

/// Requests the fake Spotify received, for assertions.
#[derive(Clone, Default)]
pub struct Recorded {
    pub token_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub history_limits: Arc<Mutex<Vec<String>>>,
    pub created: Arc<Mutex<Vec<(String, Value)>>>,
    pub added: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl Recorded {
    pub fn added_batches(&self) -> Vec<(String, Vec<String>)> {
        self.added.lock().unwrap().clone()
    }

    pub fn created_playlists(&self) -> Vec<(String, Value)> {
        self.created.lock().unwrap().clone()
    }
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [{
            "id": "artist1",
            "name": "Some Artist",
            "type": "artist",
            "uri": "spotify:artist:artist1",
            "href": "https://api.spotify.com/v1/artists/artist1",
            "external_urls": { "spotify": "https://open.spotify.com/artist/artist1" }
        }],
        "album": {
            "id": "album1",
            "name": "Some Album",
            "images": [{ "url": "https://i.scdn.co/image/cover", "height": 640, "width": 640 }],
            "release_date": "2024-05-03"
        },
        "duration_ms": 201000,
        "explicit": false,
        "popularity": 42
    })
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

fn spotify_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": message } })),
    )
        .into_response()
}

async fn token(State(rec): State<Recorded>, Form(form): Form<HashMap<String, String>>) -> Response {
    rec.token_forms.lock().unwrap().push(form.clone());

    let grant = form.get("grant_type").map(String::as_str);
    let code = form.get("code").map(String::as_str);
    let refresh = form.get("refresh_token").map(String::as_str);

    match (grant, code, refresh) {
        (Some("authorization_code"), Some("good-code"), _) => Json(json!({
            "access_token": "playing",
            "token_type": "Bearer",
            "scope": "user-read-currently-playing",
            "expires_in": 3600,
            "refresh_token": "refresh-1"
        }))
        .into_response(),
        (Some("refresh_token"), _, Some("refresh-1")) => Json(json!({
            "access_token": "fresh",
            "token_type": "Bearer",
            "scope": "user-read-currently-playing",
            "expires_in": 1800
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid authorization code" })),
        )
            .into_response(),
    }
}

async fn currently_playing(headers: HeaderMap) -> Response {
    match bearer(&headers).as_str() {
        "playing" => Json(json!({
            "is_playing": true,
            "progress_ms": 1000,
            "item": track_json("current1", "Current Song")
        }))
        .into_response(),
        "paused" => Json(json!({ "is_playing": false, "item": null })).into_response(),
        "expired" => spotify_error(StatusCode::UNAUTHORIZED, "The access token expired"),
        "garbled" => (StatusCode::OK, "this is not json").into_response(),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn recently_played(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let limit = query.get("limit").cloned().unwrap_or_default();
    rec.history_limits.lock().unwrap().push(limit.clone());

    match bearer(&headers).as_str() {
        "expired" => spotify_error(StatusCode::UNAUTHORIZED, "The access token expired"),
        "history-down" => spotify_error(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable"),
        "no-history" => Json(json!({ "items": [] })).into_response(),
        "no-items" => Json(json!({})).into_response(),
        _ => {
            let count = limit.parse::<usize>().unwrap_or(1).min(3);
            let items: Vec<Value> = (1..=count)
                .map(|i| {
                    json!({
                        "track": track_json(&format!("recent{}", i), &format!("Recent Song {}", i)),
                        "played_at": "2024-05-03T10:00:00.000Z"
                    })
                })
                .collect();
            Json(json!({ "items": items })).into_response()
        }
    }
}

async fn me(headers: HeaderMap) -> Response {
    match bearer(&headers).as_str() {
        "expired" => spotify_error(StatusCode::UNAUTHORIZED, "The access token expired"),
        _ => Json(json!({ "id": "user.one", "display_name": "User One" })).into_response(),
    }
}

async fn create_playlist(
    State(rec): State<Recorded>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    rec.created.lock().unwrap().push((user_id, body.clone()));
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "pl123",
            "name": body["name"],
            "description": body["description"],
            "public": body["public"],
            "collaborative": false,
            "uri": "spotify:playlist:pl123",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/pl123" }
        })),
    )
        .into_response()
}

async fn add_items(
    State(rec): State<Recorded>,
    Path(playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if playlist_id == "broken" {
        return spotify_error(StatusCode::NOT_FOUND, "Not found");
    }

    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut added = rec.added.lock().unwrap();
    added.push((playlist_id, uris));
    let snapshot = format!("snap-{}", added.len());

    (StatusCode::CREATED, Json(json!({ "snapshot_id": snapshot }))).into_response()
}

fn fake_spotify(rec: Recorded) -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/v1/me/player/currently-playing", get(currently_playing))
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/users/{user_id}/playlists", post(create_playlist))
        .route("/v1/playlists/{playlist_id}/tracks", post(add_items))
        .with_state(rec)
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub struct TestApp {
    pub base: String,
    pub spotify_base: String,
    pub recorded: Recorded,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn start() -> Self {
        let recorded = Recorded::default();
        let spotify_addr = spawn(fake_spotify(recorded.clone())).await;
        let spotify_base = format!("http://{}", spotify_addr);

        let config = Config::new(CLIENT_ID, REDIRECT_URI).with_spotify_base(&spotify_base);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            server::serve(listener, AppState::new(config)).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            base: format!("http://{}", addr),
            spotify_base,
            recorded,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("spotify_access_token={}", token)
}

/// `name=value` pairs from every `Set-Cookie` header, attributes dropped.
pub fn set_cookies(res: &reqwest::Response) -> HashMap<String, String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Raw `Set-Cookie` header for `name`, attributes included.
pub fn set_cookie_header(res: &reqwest::Response, name: &str) -> Option<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}
