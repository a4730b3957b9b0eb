//! Console navigation. A browser would move `window.location` and reload the
//! page; here [`History`] tracks the current location and runs registered
//! reload hooks, each of which rebuilds a piece of in-memory state from the
//! durable store.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{debug, info};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Moves the console between views and resets it.
pub trait Navigator: Send + Sync {
    /// Replaces the current location with `path`.
    fn navigate(&self, path: &str);

    /// Drops all in-memory state and rebuilds it from durable storage.
    fn reload(&self);

    /// Current location.
    fn location(&self) -> String;
}

type ReloadHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug)]
struct HistoryState {
    location: String,
    visited: Vec<String>,
    reloads: usize,
}

/// Location tracker for a single console.
pub struct History {
    state: Mutex<HistoryState>,
    hooks: Mutex<Vec<ReloadHook>>,
}

impl History {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                location: initial.to_string(),
                visited: Vec::new(),
                reloads: 0,
            }),
            hooks: Mutex::new(Vec::new()),
        }
    }

    /// Registers a routine to run on every reload.
    pub fn on_reload(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(hook));
    }

    /// Every location navigated to, oldest first.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .visited
            .clone()
    }

    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reloads
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks = self
            .hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("History")
            .field("state", &self.state)
            .field("hooks", &hooks)
            .finish()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("navigate: {} -> {}", state.location, path);
        state.location = path.to_string();
        state.visited.push(path.to_string());
    }

    fn reload(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.reloads += 1;
        }

        // snapshot so a hook may register hooks or reload again
        let hooks: Vec<ReloadHook> = self
            .hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        info!("reloading console state ({} hooks)", hooks.len());
        for hook in hooks.iter() {
            hook();
        }
    }

    fn location(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .location
            .clone()
    }
}
