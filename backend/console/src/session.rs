//! Operator session as seen from the terminal.
//!
//! `NoToken -> Unverified -> Verified`, or `Rejected` which wipes the stored
//! token and sends the operator back to `login`.
use std::time::Duration;

use anyhow::{Result, bail};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::token_store::TokenStore;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoToken,
    Unverified(String),
    Verified { token: String, user: SessionUser },
    Rejected(String),
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: SessionUser,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

pub struct Gate {
    http: Client,
    server_url: String,
    store: TokenStore,
}

impl Gate {
    pub fn new(server_url: &str, store: TokenStore, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            server_url: server_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn current(&self) -> Result<SessionState> {
        Ok(match self.store.load()? {
            Some(token) => SessionState::Unverified(token),
            None => SessionState::NoToken,
        })
    }

    /// Asks the admin service about the stored token. Anything but a clean
    /// success clears the store.
    pub async fn verify(&self) -> Result<SessionState> {
        let SessionState::Unverified(token) = self.current()? else {
            return Ok(SessionState::NoToken);
        };

        let outcome = self
            .http
            .get(format!("{}/api/admin/verify", self.server_url))
            .bearer_auth(&token)
            .send()
            .await;

        let state = match outcome {
            Ok(response) if response.status().is_success() => {
                match response.json::<VerifyResponse>().await {
                    Ok(body) => SessionState::Verified {
                        token,
                        user: body.user,
                    },
                    Err(e) => SessionState::Rejected(format!("Undecodable verify response: {e}")),
                }
            }
            Ok(response) => {
                let status = response.status();
                let reason = response
                    .json::<MessageBody>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| status.to_string());

                SessionState::Rejected(reason)
            }
            Err(e) => SessionState::Rejected(format!("Verification failed: {e}")),
        };

        if let SessionState::Rejected(reason) = &state {
            warn!("Session rejected: {reason}");
            self.store.clear()?;
        }

        Ok(state)
    }

    /// Verified token and user, or an error asking for a fresh login.
    pub async fn require(&self) -> Result<(String, SessionUser)> {
        match self.verify().await? {
            SessionState::Verified { token, user } => Ok((token, user)),
            SessionState::Rejected(reason) => {
                bail!("{reason}. Please log in again with `corpora-console login`")
            }
            _ => bail!("Not logged in. Run `corpora-console login` first"),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        let response = self
            .http
            .post(format!("{}/api/admin/login", self.server_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<MessageBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            bail!("Login failed: {reason}");
        }

        let body: LoginResponse = response.json().await?;
        self.store.save(&body.token)?;
        info!("Stored session token in {}", self.store.path().display());

        Ok(body.user)
    }

    /// Clears the local token even when the service is unreachable.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self
            .http
            .post(format!("{}/api/admin/logout", self.server_url))
            .send()
            .await
        {
            warn!("Logout request failed: {e}");
        }

        self.store.clear()
    }
}
