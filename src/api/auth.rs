use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::SetError,
    server::AppState,
    spotify, success,
    types::{CheckAuthResponse, PendingLogin},
    utils, warning,
};

use super::session::{bearer_token, session_cookie, session_id};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Starts a browser login and redirects to the authorization page.
///
/// Every login gets a new session id; a cookie sent by the client is never
/// reused for the token that the callback stores.
pub async fn login(State(state): State<AppState>) -> Result<Response, SetError> {
    let session = utils::generate_session_id();
    let return_to = format!("{}?login=success", state.config.frontend_url);

    let auth_url = begin_login(&state, &session, Some(return_to)).await?;

    Ok((
        [(header::SET_COOKIE, session_cookie(&session))],
        Redirect::to(&auth_url),
    )
        .into_response())
}

/// Registers a PKCE login for `session` and returns the authorization URL.
pub async fn begin_login(
    state: &AppState,
    session: &str,
    return_to: Option<String>,
) -> Result<String, SetError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let oauth_state = utils::generate_session_id();

    let auth_url = spotify::auth::authorize_url(&state.config, &code_challenge, &oauth_state)?;

    state
        .sessions
        .begin_login(
            oauth_state,
            PendingLogin {
                code_verifier,
                session_id: session.to_string(),
                return_to,
            },
        )
        .await;

    Ok(auth_url)
}

/// Completes the login started by [`login`].
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        warning!("Authorization was denied: {}", error);
        return (StatusCode::BAD_REQUEST, Html("<h4>Login was cancelled.</h4>")).into_response();
    }

    let (Some(code), Some(oauth_state)) = (params.code, params.state) else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>"),
        )
            .into_response();
    };

    let Some(pending) = state.sessions.complete_login(&oauth_state).await else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Unknown or expired login.</h4>"),
        )
            .into_response();
    };

    match spotify::auth::exchange_code_pkce(&state.http, &state.config, &code, &pending.code_verifier)
        .await
    {
        Ok(token) => {
            state.sessions.store_token(&pending.session_id, token).await;
            success!("Session logged in");
            match pending.return_to {
                Some(url) => Redirect::to(&url).into_response(),
                None => Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
                    .into_response(),
            }
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (StatusCode::BAD_GATEWAY, Html("<h4>Login failed.</h4>")).into_response()
        }
    }
}

pub async fn check_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<CheckAuthResponse> {
    let is_logged_in = if bearer_token(&headers).is_some() {
        true
    } else {
        match session_id(&headers) {
            Some(session) => state.sessions.is_logged_in(&session).await,
            None => false,
        }
    };

    Json(CheckAuthResponse { is_logged_in })
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if let Some(session) = session_id(&headers) {
        state.sessions.sign_out(&session).await;
    }
    Redirect::to("/")
}
