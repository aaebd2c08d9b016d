use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use setsmith::{
    config::Config,
    management::SessionManager,
    server::{AppState, router},
    types::Token,
};
use tower::ServiceExt;

fn config() -> Config {
    Config::from_lookup(|name| match name {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("client-123".to_string()),
        "SPOTIFY_API_REDIRECT_URI" => Some("http://localhost:5001/callback".to_string()),
        "SPOTIFY_API_URL" => Some("http://127.0.0.1:9/v1".to_string()),
        _ => None,
    })
    .unwrap()
}

fn fresh_token() -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    }
}

// Router with one logged-in session called "s1"
async fn app() -> (Router, SessionManager) {
    let sessions = SessionManager::new();
    sessions.store_token("s1", fresh_token()).await;
    let app = router(AppState::with_sessions(config(), sessions.clone()));
    (app, sessions)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn index_greets() {
    let (app, _) = app().await;
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Welcome to SetSmith!");
}

#[tokio::test]
async fn check_auth_reflects_the_session() {
    let (app, _) = app().await;

    let anonymous = app
        .clone()
        .oneshot(Request::get("/check-auth").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(anonymous).await, json!({ "isLoggedIn": false }));

    let logged_in = app
        .oneshot(
            Request::get("/check-auth")
                .header(header::COOKIE, "setsmith_session=s1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(logged_in).await, json!({ "isLoggedIn": true }));
}

#[tokio::test]
async fn create_set_without_session_redirects_to_login() {
    let (app, _) = app().await;
    let response = app
        .oneshot(post_json(
            "/create-set",
            json!({ "selected_playlist_id": "p1", "playlist_name": "Friday" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn create_set_without_playlist_id_is_rejected() {
    let (app, _) = app().await;
    let response = app
        .oneshot(post_json(
            "/create-set",
            json!({ "playlist_name": "Friday", "duration": "30" }),
            Some("setsmith_session=s1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "selected_playlist_id is required" })
    );
}

#[tokio::test]
async fn create_set_with_malformed_body_is_rejected() {
    let (app, _) = app().await;
    let response = app
        .oneshot(
            Request::post("/create-set")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, "setsmith_session=s1")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn favorites_limit_out_of_range_is_rejected() {
    let (app, _) = app().await;
    let response = app
        .oneshot(post_json(
            "/favorites-playlist",
            json!({ "playlist_name": "Top", "limit": 99 }),
            Some("setsmith_session=s1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_catalog_is_a_bad_gateway() {
    let (app, _) = app().await;
    let response = app
        .oneshot(
            Request::get("/playlist-genres/p1")
                .header(header::AUTHORIZATION, "Bearer token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "catalog unavailable" })
    );
}

#[tokio::test]
async fn login_sets_cookie_and_redirects_to_authorization() {
    let (app, _) = app().await;
    let response = app
        .oneshot(Request::get("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(location.contains("code_challenge_method=S256"));

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("setsmith_session="));
}

#[tokio::test]
async fn login_never_reuses_the_client_session_cookie() {
    let (app, _) = app().await;
    let response = app
        .oneshot(
            Request::get("/login")
                .header(header::COOKIE, "setsmith_session=planted")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("setsmith_session="));
    assert!(!cookie.starts_with("setsmith_session=planted;"));
}

#[tokio::test]
async fn callback_with_unknown_state_is_rejected() {
    let (app, _) = app().await;
    let response = app
        .oneshot(
            Request::get("/callback?code=abc&state=unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_out_forgets_the_session() {
    let (app, sessions) = app().await;
    let response = app
        .oneshot(
            Request::get("/sign_out")
                .header(header::COOKIE, "setsmith_session=s1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(!sessions.is_logged_in("s1").await);
}
