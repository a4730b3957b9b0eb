use crate::config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_MS};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_TIMEOUT_MS: &str = "timeout-ms";
pub const ARG_STORAGE: &str = "storage";

/// Builds the console config from the global connection arguments.
///
/// # Errors
/// Returns an error if the base URL or timeout is invalid.
pub fn parse(matches: &ArgMatches) -> anyhow::Result<AppConfig> {
    AppConfig::new(
        matches.get_one::<String>(ARG_API_BASE_URL).map(String::as_str),
        matches
            .get_one::<u64>(ARG_TIMEOUT_MS)
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_MS),
        matches.get_one::<PathBuf>(ARG_STORAGE).map(PathBuf::as_path),
    )
    .context("invalid console configuration")
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Base URL of the content API")
                .env("NEWSDESK_API_BASE_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_MS)
                .long(ARG_TIMEOUT_MS)
                .help("Request timeout in milliseconds")
                .env("NEWSDESK_TIMEOUT_MS")
                .default_value("5000")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_STORAGE)
                .long(ARG_STORAGE)
                .help("Path of the file that keeps the session between runs")
                .long_help(
                    "Path of the file that keeps the session between runs. Defaults to $HOME/.newsdesk/storage.json. The file holds a bearer credential and is written owner-only.",
                )
                .env("NEWSDESK_STORAGE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}
