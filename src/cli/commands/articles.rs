use clap::{Arg, ArgAction, Command};

pub const CMD_CHANNELS: &str = "channels";
pub const CMD_ARTICLES: &str = "articles";
pub const CMD_PUBLISH: &str = "publish";
pub const CMD_OPEN: &str = "open";

pub const ARG_PAGE: &str = "page";
pub const ARG_PER_PAGE: &str = "per-page";
pub const ARG_TITLE: &str = "title";
pub const ARG_CHANNEL_ID: &str = "channel-id";
pub const ARG_CONTENT: &str = "content";
pub const ARG_COVER_TYPE: &str = "cover-type";
pub const ARG_IMAGE: &str = "image";
pub const ARG_PATH: &str = "path";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(Command::new(CMD_CHANNELS).about("List the channels articles can be filed under"))
        .subcommand(
            Command::new(CMD_ARTICLES)
                .about("List published articles")
                .arg(
                    Arg::new(ARG_PAGE)
                        .long(ARG_PAGE)
                        .help("Page number, starting at 1")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(ARG_PER_PAGE)
                        .long(ARG_PER_PAGE)
                        .help("Articles per page")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new(CMD_PUBLISH)
                .about("Publish an article")
                .arg(
                    Arg::new(ARG_TITLE)
                        .short('t')
                        .long(ARG_TITLE)
                        .help("Article title")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_CHANNEL_ID)
                        .long(ARG_CHANNEL_ID)
                        .help("Channel id, see `newsdesk channels`")
                        .required(true)
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new(ARG_CONTENT)
                        .long(ARG_CONTENT)
                        .help("Article body (HTML)")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_COVER_TYPE)
                        .long(ARG_COVER_TYPE)
                        .help("Cover layout: 0 none, 1 single image, 3 three images")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    Arg::new(ARG_IMAGE)
                        .long(ARG_IMAGE)
                        .help("Cover image URL, repeat for several")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new(CMD_OPEN)
                .about("Open a console view, e.g. / or /publish")
                .arg(Arg::new(ARG_PATH).help("View path").required(true)),
        )
}
