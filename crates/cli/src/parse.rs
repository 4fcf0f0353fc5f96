//! ArgMatches → CliAction conversion.
//!
//! Translates clap's parsed arguments into the run to perform:
//! - `counter` → `CliAction::Counter` with the modes to run, guarded first
//! - `bank` → `CliAction::Bank` with an optional seed override
//! - `all` → every run in turn
//! - `config` → print the default config

use clap::ArgMatches;
use lockwise_engine::CounterMode;

/// The run the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Counter run, once per mode.
    Counter(Vec<CounterMode>),
    /// Producer/consumer pipeline.
    Pipeline,
    /// Bank run, seed overriding the config file when given.
    Bank { seed: Option<u64> },
    /// Number and square threads.
    Interleave,
    /// Every run in turn.
    All,
    /// Print the default config file.
    PrintConfig,
}

/// Global flags shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    pub config: Option<String>,
    pub json: bool,
    pub verbose: u8,
}

/// Extract the global flags.
pub fn global_args(matches: &ArgMatches) -> GlobalArgs {
    GlobalArgs {
        config: matches.get_one::<String>("config").cloned(),
        json: matches.get_flag("json"),
        verbose: matches.get_count("verbose"),
    }
}

/// Convert clap matches into a [`CliAction`].
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command given".to_string())?;

    match name {
        "counter" => {
            let mode = sub
                .get_one::<String>("mode")
                .map(String::as_str)
                .unwrap_or("both");
            Ok(CliAction::Counter(parse_counter_modes(mode)?))
        }
        "pipeline" => Ok(CliAction::Pipeline),
        "bank" => Ok(CliAction::Bank {
            seed: sub.get_one::<u64>("seed").copied(),
        }),
        "interleave" => Ok(CliAction::Interleave),
        "all" => Ok(CliAction::All),
        "config" => Ok(CliAction::PrintConfig),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_counter_modes(mode: &str) -> Result<Vec<CounterMode>, String> {
    match mode {
        "guarded" => Ok(vec![CounterMode::Guarded]),
        "unguarded" => Ok(vec![CounterMode::Unguarded]),
        "both" => Ok(vec![CounterMode::Guarded, CounterMode::Unguarded]),
        other => Err(format!("Unknown counter mode: {}", other)),
    }
}
