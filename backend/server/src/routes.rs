use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    cookies::{cleared_cookie, session_cookie},
    credentials::{PublicUser, authenticate},
    error::AppError,
    guard::presented_token,
    session::{self, SessionError, now_ms},
    state::AppState,
};

#[derive(Deserialize)]
pub struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    success: bool,
    token: String,
    user: PublicUser,
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(credentials) = payload.map_err(|_| AppError::MalformedPayload)?;

    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    info!("Login attempt for {}", credentials.email.trim());

    let Some(admin) = authenticate(&state.config.admins, &credentials.email, &credentials.password)
    else {
        warn!("Rejected login for {}", credentials.email.trim());
        return Err(AppError::InvalidCredentials);
    };

    let token = session::issue(admin, now_ms()).map_err(|e| AppError::InternalError(e.into()))?;
    let cookie = session_cookie(&token, state.config.token_ttl, state.config.secure_cookies);

    let body = LoginResponse {
        success: true,
        token,
        user: admin.public(),
    };

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)).into_response())
}

pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = presented_token(&headers).ok_or(SessionError::Missing)?;
    let claims = session::verify(&token, now_ms(), state.config.token_ttl)?;

    Ok(Json(json!({
        "success": true,
        "user": { "id": claims.id, "email": claims.email }
    })))
}

pub async fn logout_handler() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, cleared_cookie())]),
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

/// Already signed in operators skip the form.
pub async fn login_page_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let signed_in = presented_token(&headers)
        .is_some_and(|token| session::verify(&token, now_ms(), state.config.token_ttl).is_ok());

    if signed_in {
        return Redirect::temporary("/admin").into_response();
    }

    Json(json!({
        "page": "login",
        "action": "/api/admin/login",
        "fields": ["email", "password"]
    }))
    .into_response()
}
