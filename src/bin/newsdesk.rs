use anyhow::Result;
use newsdesk::cli::start;

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;
    action.execute().await
}
