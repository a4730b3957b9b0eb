use crate::{
    navigation::{Navigator, LOGIN_PATH},
    session::TokenStore,
};
use std::{fmt, sync::Arc};
use tracing::debug;

/// Outcome of rendering a protected view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guarded<V> {
    Rendered(V),
    Redirected(&'static str),
}

impl<V> Guarded<V> {
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected(_))
    }

    pub fn rendered(self) -> Option<V> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::Redirected(_) => None,
        }
    }
}

/// Wraps the views that need a signed-in user.
///
/// UX-only gate: it only checks that a token exists. Whether the server still
/// accepts it is found out on the first API call.
#[derive(Clone)]
pub struct RouteGuard {
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGuard")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl RouteGuard {
    #[must_use]
    pub fn new(tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { tokens, navigator }
    }

    #[must_use]
    pub fn allows(&self) -> bool {
        self.tokens.is_present()
    }

    /// Renders `view` when a token is stored; otherwise navigates to the login
    /// view without calling `view` at all.
    pub fn render<V>(&self, view: impl FnOnce() -> V) -> Guarded<V> {
        if self.allows() {
            Guarded::Rendered(view())
        } else {
            debug!("no credential stored, redirecting to {}", LOGIN_PATH);
            self.navigator.navigate(LOGIN_PATH);
            Guarded::Redirected(LOGIN_PATH)
        }
    }
}
