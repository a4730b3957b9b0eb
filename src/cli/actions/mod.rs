pub mod articles;
pub mod open;
pub mod session;

use crate::guard::Guarded;
use anyhow::bail;

// The match over every action lives in `run` so this module stays a plain list.
mod run;

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Logout(session::Args),
    Status(session::Args),
    Profile(session::Args),
    Channels(articles::Args),
    Articles(articles::ListArgs),
    Publish(articles::PublishArgs),
    Open(open::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Unwraps a guarded result, failing when the guard sent the console to login.
///
/// # Errors
/// Returns an error if no credential is stored.
pub fn signed_in<T>(outcome: Guarded<T>) -> anyhow::Result<T> {
    match outcome {
        Guarded::Rendered(value) => Ok(value),
        Guarded::Redirected(_) => bail!("not signed in, run `newsdesk login` first"),
    }
}
