use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_STATUS: &str = "status";
pub const CMD_PROFILE: &str = "profile";

pub const ARG_MOBILE: &str = "mobile";
pub const ARG_CODE: &str = "code";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in with a mobile number and verification code")
                .arg(
                    Arg::new(ARG_MOBILE)
                        .short('m')
                        .long(ARG_MOBILE)
                        .help("Mobile number, 11 digits")
                        .env("NEWSDESK_MOBILE")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_CODE)
                        .short('c')
                        .long(ARG_CODE)
                        .help("Verification code, at most 6 characters")
                        .env("NEWSDESK_CODE")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Erase the stored credential"))
        .subcommand(Command::new(CMD_STATUS).about("Show whether a credential is stored"))
        .subcommand(Command::new(CMD_PROFILE).about("Show the signed-in user's profile"))
}
