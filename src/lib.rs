//! # Newsdesk
//!
//! `newsdesk` is the operator console for authoring and publishing articles
//! against a remote content API. Everything except the login screen sits behind
//! a bearer session, so the crate is mostly about keeping that session honest.
//!
//! ## Session model
//!
//! Exactly one credential exists per console. It lives in a durable key-value
//! file under the `token_key` entry so it survives restarts, the same way a
//! browser console keeps it in `localStorage`.
//!
//! 1. **Login:** [`session::SessionStore::login`] posts the `{ mobile, code }`
//!    form to `/authorizations` and commits the returned token to both its own
//!    observable state and the [`session::TokenStore`].
//! 2. **Attachment:** every call made through [`api::ApiClient`] reads the token
//!    store right before dispatch and sends `Authorization: Bearer <token>`.
//! 3. **Recovery:** a `401` on any response erases the token, moves the console
//!    to `/login` and reinitializes all in-memory session state from the durable
//!    store. The caller still receives the error.
//! 4. **Gating:** [`guard::RouteGuard`] refuses to render protected views while
//!    the token store is empty and redirects to `/login` instead.
//!
//! The token store is the single source of truth: the HTTP client and the guard
//! both read it directly and never keep their own copy.

pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod guard;
pub mod navigation;
pub mod session;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
