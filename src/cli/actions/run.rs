use crate::cli::actions::{articles, open, session, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Logout(args) => session::logout(&args),
        Action::Status(args) => session::status(&args),
        Action::Profile(args) => session::profile(args).await,
        Action::Channels(args) => articles::channels(args).await,
        Action::Articles(args) => articles::list(args).await,
        Action::Publish(args) => articles::publish(args).await,
        Action::Open(args) => open::execute(args).await,
    }
}
