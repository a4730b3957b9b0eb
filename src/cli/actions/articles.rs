use super::signed_in;
use crate::{
    config::AppConfig,
    console::{
        article::{ArticleQuery, PublishForm},
        Console,
    },
};
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
}

#[derive(Debug)]
pub struct ListArgs {
    pub config: AppConfig,
    pub query: ArticleQuery,
}

#[derive(Debug)]
pub struct PublishArgs {
    pub config: AppConfig,
    pub form: PublishForm,
}

/// # Errors
/// Returns an error if the channel request fails.
pub async fn channels(args: Args) -> Result<()> {
    let console = Console::new(&args.config)?;
    let channels = signed_in(console.channels().await.context("failed to load channels")?)?;

    for channel in channels {
        println!("{:>6}  {}", channel.id, channel.name);
    }
    Ok(())
}

/// # Errors
/// Returns an error if the article request fails.
pub async fn list(args: ListArgs) -> Result<()> {
    let console = Console::new(&args.config)?;
    let page = signed_in(
        console
            .articles(args.query)
            .await
            .context("failed to load articles")?,
    )?;

    println!(
        "page {} ({} per page, {} total)",
        page.page, page.per_page, page.total_count
    );
    for article in page.results {
        println!("{:>12}  {}", article.id, article.title);
    }
    Ok(())
}

/// # Errors
/// Returns an error if the form is invalid or the server rejects the article.
pub async fn publish(args: PublishArgs) -> Result<()> {
    let console = Console::new(&args.config)?;
    let id = signed_in(
        console
            .publish(&args.form)
            .await
            .context("failed to publish the article")?,
    )?;

    println!("Published article {id}");
    Ok(())
}
