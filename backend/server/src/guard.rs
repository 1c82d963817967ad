//! Two layers protect the admin views.
//!
//! The edge guard only checks that the `adminToken` cookie exists and bounces
//! everyone else to the login page. The session guard then decodes and
//! expires the token (bearer header first, cookie second) and hands the
//! verified [`Session`] to the handler.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::{AUTHORIZATION, SET_COOKIE}},
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tracing::{debug, info};

use crate::{
    cookies::{TOKEN_COOKIE, cleared_cookie, read_cookie},
    session::{self, Claims, SessionError, now_ms},
    state::AppState,
};

pub const LOGIN_PATH: &str = "/admin/login";

#[derive(Clone, Debug)]
pub struct Session {
    pub claims: Claims,
    pub token: String,
}

/// Bearer token if present, otherwise the session cookie.
pub fn presented_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|token| !token.is_empty());

    bearer
        .or_else(|| read_cookie(headers, TOKEN_COOKIE))
        .map(str::to_string)
}

fn is_protected(path: &str) -> bool {
    (path == "/admin" || path.starts_with("/admin/")) && path != LOGIN_PATH
}

pub async fn edge_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_protected(path) && read_cookie(request.headers(), TOKEN_COOKIE).is_none() {
        debug!("No session cookie for {path}, redirecting");
        return Redirect::temporary(LOGIN_PATH).into_response();
    }

    next.run(request).await
}

pub async fn session_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = presented_token(request.headers())
        .ok_or(SessionError::Missing)
        .and_then(|token| {
            session::verify(&token, now_ms(), state.config.token_ttl)
                .map(|claims| Session { claims, token })
        });

    match verified {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => {
            info!("Rejected admin session: {e}");
            (
                AppendHeaders([(SET_COOKIE, cleared_cookie())]),
                Redirect::temporary(LOGIN_PATH),
            )
                .into_response()
        }
    }
}
