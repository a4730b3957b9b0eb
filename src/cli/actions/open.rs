use crate::{
    config::AppConfig,
    console::{Console, Content, View},
    guard::Guarded,
};
use anyhow::{Context, Result};
use std::fmt::Write;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub path: String,
}

/// # Errors
/// Returns an error if the view's data cannot be loaded.
pub async fn execute(args: Args) -> Result<()> {
    let console = Console::new(&args.config)?;
    let outcome = console
        .open(&args.path)
        .await
        .with_context(|| format!("failed to open {}", args.path))?;

    print!("{}", render(&outcome));
    Ok(())
}

/// Plain-text rendering of a view, one line per item.
#[must_use]
pub fn render(outcome: &Guarded<View>) -> String {
    let mut out = String::new();
    match outcome {
        Guarded::Redirected(to) => {
            let _ = writeln!(out, "Not signed in, redirected to {to}");
        }
        Guarded::Rendered(View::Login) => {
            let _ = writeln!(out, "Sign in with `newsdesk login --mobile <MOBILE> --code <CODE>`");
        }
        Guarded::Rendered(View::NotFound(path)) => {
            let _ = writeln!(out, "No view at {path}");
        }
        Guarded::Rendered(View::Page(page)) => {
            let _ = writeln!(out, "[{}] {}", page.route.path(), page.profile.name);
            match &page.content {
                Content::Articles(articles) => {
                    let _ = writeln!(out, "{} articles", articles.total_count);
                    for article in &articles.results {
                        let _ = writeln!(out, "  {}  {}", article.id, article.title);
                    }
                }
                Content::Publish { channels } => {
                    let _ = writeln!(out, "{} channels", channels.len());
                    for channel in channels {
                        let _ = writeln!(out, "  {}  {}", channel.id, channel.name);
                    }
                }
            }
        }
    }
    out
}
