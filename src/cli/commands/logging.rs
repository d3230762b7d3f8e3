use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; a name's index is its `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accept `RECKON_LOG_LEVEL` as a level name or as a verbosity count.
fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim();
    let index = level.parse::<usize>().ok().or_else(|| {
        LEVELS.iter().position(|name| name.eq_ignore_ascii_case(level))
    });

    index
        .filter(|index| *index < LEVELS.len())
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            format!(
                "invalid log level {level:?}, expected one of {}",
                LEVELS.join(", ")
            )
        })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Repeat to raise log verbosity: -v warn, -vv info, -vvv debug, -vvvv trace")
            .env("RECKON_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_log_level)),
    )
}
