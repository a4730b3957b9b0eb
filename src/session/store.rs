//! Observable session state. The store keeps a cached copy of the token for UI
//! binding next to the optional user profile; the [`TokenStore`] stays the
//! source of truth and every commit goes through it first.
//!
//! Transitions: a successful `login` moves the session to authenticated. The
//! way back is driven from outside, by the HTTP client's 401 recovery, which
//! reloads the console and so runs [`SessionStore::reinitialize`].

use super::token::TokenStore;
use crate::api::{ApiClient, ApiError, Envelope};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

pub const LOGIN_ENDPOINT: &str = "/authorizations";
pub const PROFILE_ENDPOINT: &str = "/user/profile";

/// Credential request submitted by the login form.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub code: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("mobile", &self.mobile)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct IssuedToken {
    token: String,
}

/// Accepts both the enveloped `{ data: { token } }` body and a bare `{ token }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Enveloped(Envelope<IssuedToken>),
    Bare(IssuedToken),
}

impl LoginResponse {
    fn into_token(self) -> String {
        match self {
            Self::Enveloped(envelope) => envelope.data.token,
            Self::Bare(issued) => issued.token,
        }
    }
}

/// Current user as reported by `/user/profile`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub birthday: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub token: Option<SecretString>,
    pub user_info: Option<UserProfile>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
    tokens: TokenStore,
    api: ApiClient,
}

impl SessionStore {
    /// Hydrates the session from the token store, like a page load would.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.tokens().clone();
        let (state, _) = watch::channel(SessionState {
            token: tokens.get(),
            user_info: None,
        });

        Self {
            state: Arc::new(state),
            tokens,
            api,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Commits a credential to the token store and then to session state.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the token cannot be persisted; state is
    /// left untouched in that case.
    pub fn set_token(&self, token: SecretString) -> Result<(), ApiError> {
        self.tokens.set(&token)?;
        let token = self.tokens.get();
        self.state.send_modify(|state| state.token = token);
        Ok(())
    }

    /// Exchanges the login form for a token and commits it.
    ///
    /// # Errors
    /// Any error from the request propagates unchanged; `Parse` if the response
    /// carries no token.
    #[instrument(skip_all, fields(mobile = %request.mobile))]
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let response: LoginResponse = self.api.post(LOGIN_ENDPOINT, request).await?;
        let token = response.into_token();
        if token.trim().is_empty() {
            return Err(ApiError::Parse(
                "Login response did not include a token.".to_string(),
            ));
        }

        self.set_token(SecretString::from(token))?;
        info!("login succeeded");
        Ok(())
    }

    /// Fetches the current user's profile and caches it in session state.
    ///
    /// # Errors
    /// Any error from the request propagates unchanged.
    #[instrument(skip_all)]
    pub async fn fetch_user_info(&self) -> Result<UserProfile, ApiError> {
        let envelope: Envelope<UserProfile> = self.api.get(PROFILE_ENDPOINT).await?;
        let profile = envelope.into_data();
        let cached = profile.clone();
        self.state.send_modify(|state| state.user_info = Some(cached));
        debug!("profile cached for user {}", profile.id);
        Ok(profile)
    }

    /// Explicit sign-out: erase the credential and clear session state.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the token cannot be erased.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.tokens.remove()?;
        self.state.send_replace(SessionState::default());
        info!("logged out");
        Ok(())
    }

    /// Discards in-memory state and rebuilds it from the token store.
    pub fn reinitialize(&self) {
        reset_from_store(&self.state, &self.tokens);
    }

    /// The reset routine as a standalone hook for [`crate::navigation::History::on_reload`].
    #[must_use]
    pub fn reload_hook(&self) -> impl Fn() + Send + Sync + 'static {
        let state = Arc::clone(&self.state);
        let tokens = self.tokens.clone();
        move || reset_from_store(&state, &tokens)
    }

    /// Token as cached in session state, which may lag the store until the next
    /// reload.
    #[must_use]
    pub fn cached_token(&self) -> Option<String> {
        self.state
            .borrow()
            .token
            .as_ref()
            .map(|token| token.expose_secret().to_string())
    }
}

fn reset_from_store(state: &watch::Sender<SessionState>, tokens: &TokenStore) {
    state.send_replace(SessionState {
        token: tokens.get(),
        user_info: None,
    });
    debug!("session state reinitialized from storage");
}
