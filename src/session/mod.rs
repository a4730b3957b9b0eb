//! Session state for the console: the durable [`TokenStore`] that every seam
//! reads the credential from, and the observable [`SessionStore`] the UI binds
//! to. Token material is held in `SecretString` and must never be logged.

pub mod store;
pub mod token;

pub use store::{LoginRequest, SessionState, SessionStore, UserProfile};
pub use token::{TokenStore, TOKEN_KEY};
