use super::signed_in;
use crate::{config::AppConfig, console::login::LoginForm, console::Console};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
}

#[derive(Debug)]
pub struct LoginArgs {
    pub config: AppConfig,
    pub mobile: String,
    pub code: SecretString,
}

/// # Errors
/// Returns an error if the form is invalid or the server refuses the login.
pub async fn login(args: LoginArgs) -> Result<()> {
    let console = Console::new(&args.config)?;
    let form = LoginForm::new(&args.mobile, args.code.expose_secret());

    console.submit_login(&form).await.context("login failed")?;

    info!("session stored in {}", args.config.storage_path.display());
    println!("Signed in as {}", args.mobile.trim());
    Ok(())
}

/// # Errors
/// Returns an error if the stored credential cannot be erased.
pub fn logout(args: &Args) -> Result<()> {
    let console = Console::new(&args.config)?;
    console.logout().context("failed to erase the stored credential")?;
    println!("Signed out");
    Ok(())
}

/// # Errors
/// Returns an error if the console cannot be opened.
pub fn status(args: &Args) -> Result<()> {
    let console = Console::new(&args.config)?;
    if console.session().is_authenticated() {
        println!("Signed in ({})", args.config.storage_path.display());
    } else {
        println!("Signed out");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the profile request fails.
pub async fn profile(args: Args) -> Result<()> {
    let console = Console::new(&args.config)?;
    let profile = signed_in(
        console
            .profile()
            .await
            .context("failed to load the profile")?,
    )?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
