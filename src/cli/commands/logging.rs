use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in the order `-v` counts through them.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or its position in [`LEVELS`], so `NEWSDESK_LOG_LEVEL`
/// can say either `debug` or `3`.
fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_ascii_lowercase();
    let position = level
        .parse::<usize>()
        .ok()
        .filter(|index| *index < LEVELS.len())
        .or_else(|| LEVELS.iter().position(|name| *name == level));

    position
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unknown log level {level:?}, expected one of {}", LEVELS.join(", ")))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("More log output on stderr; repeat for more (-vv info, -vvv debug)")
            .long_help(
                "More log output on stderr. Repeat the flag to raise the level: -v warn, -vv info, -vvv debug, -vvvv trace. NEWSDESK_LOG_LEVEL takes a level name or number instead; RUST_LOG overrides both.",
            )
            .env("NEWSDESK_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
