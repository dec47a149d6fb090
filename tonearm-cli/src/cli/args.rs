//! CLI argument definitions for `tonearm`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("Tonearm")
        .version("0.1.0")
        .about("Play a single audio file with transport controls")
        .arg_required_else_help(true)
        .arg(
            Arg::new("GAIN")
                .long("gain")
                .short('g')
                .value_name("GAIN")
                .default_value("70")
                .help("The playback gain (0-100)"),
        )
        .arg(
            Arg::new("tick-ms")
                .long("tick-ms")
                .value_name("MS")
                .default_value("1000")
                .help("Progress refresh interval in milliseconds"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Play without the terminal UI"),
        )
        .arg(
            Arg::new("INPUT")
                .help("The audio file to play")
                .required(false)
                .index(1),
        )
        .subcommand(
            Command::new("probe")
                .about("Print the duration of an audio file and exit")
                .arg(
                    Arg::new("INPUT")
                        .help("The audio file to probe")
                        .required(true)
                        .index(1),
                ),
        )
}
