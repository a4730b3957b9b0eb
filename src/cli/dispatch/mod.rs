use crate::{
    cli::{
        actions::{articles, open, session, Action},
        commands::{
            api,
            articles::{
                ARG_CHANNEL_ID, ARG_CONTENT, ARG_COVER_TYPE, ARG_IMAGE, ARG_PAGE, ARG_PATH,
                ARG_PER_PAGE, ARG_TITLE, CMD_ARTICLES, CMD_CHANNELS, CMD_OPEN, CMD_PUBLISH,
            },
            session::{ARG_CODE, ARG_MOBILE, CMD_LOGIN, CMD_LOGOUT, CMD_PROFILE, CMD_STATUS},
        },
    },
    console::article::{ArticleQuery, PublishForm},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

/// # Errors
/// Returns an error if required arguments are missing or the configuration is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = api::parse(matches)?;

    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("no command given, see --help"));
    };

    let action = match name {
        CMD_LOGIN => Action::Login(session::LoginArgs {
            config,
            mobile: required(sub, ARG_MOBILE)?,
            code: SecretString::from(required(sub, ARG_CODE)?),
        }),
        CMD_LOGOUT => Action::Logout(session::Args { config }),
        CMD_STATUS => Action::Status(session::Args { config }),
        CMD_PROFILE => Action::Profile(session::Args { config }),
        CMD_CHANNELS => Action::Channels(articles::Args { config }),
        CMD_ARTICLES => Action::Articles(articles::ListArgs {
            config,
            query: ArticleQuery {
                page: sub.get_one::<u32>(ARG_PAGE).copied().unwrap_or(1),
                per_page: sub.get_one::<u32>(ARG_PER_PAGE).copied().unwrap_or(10),
            },
        }),
        CMD_PUBLISH => Action::Publish(articles::PublishArgs {
            config,
            form: PublishForm {
                title: required(sub, ARG_TITLE)?,
                channel_id: sub.get_one::<u64>(ARG_CHANNEL_ID).copied(),
                content: required(sub, ARG_CONTENT)?,
                cover_type: sub.get_one::<u8>(ARG_COVER_TYPE).copied().unwrap_or(1),
                images: sub
                    .get_many::<String>(ARG_IMAGE)
                    .map(|images| images.cloned().collect())
                    .unwrap_or_default(),
            },
        }),
        CMD_OPEN => Action::Open(open::Args {
            config,
            path: required(sub, ARG_PATH)?,
        }),
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(action)
}
