//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("lockwise")
        .about("Race conditions and their remedies, run live")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file (default: ./lockwise.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log worker activity to stderr (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(build_counter())
        .subcommand(Command::new("pipeline").about("Producers and polling consumers on a shared list"))
        .subcommand(build_bank())
        .subcommand(Command::new("interleave").about("Number and square threads side by side"))
        .subcommand(Command::new("all").about("Run every demonstration in turn"))
        .subcommand(Command::new("config").about("Print the default config file"))
}

fn build_counter() -> Command {
    Command::new("counter")
        .about("Shared counter with and without a lock")
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("Increment path to run")
                .value_parser(["guarded", "unguarded", "both"])
                .default_value("both"),
        )
}

fn build_bank() -> Command {
    Command::new("bank")
        .about("Concurrent clients against one account")
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed the clients' RNGs (overrides the config file)")
                .value_parser(value_parser!(u64)),
        )
}
