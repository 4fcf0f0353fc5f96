//! Lockwise CLI: run the race-condition demonstrations from the shell.
//!
//! `lockwise [flags] COMMAND` runs one demonstration (or `all`), prints its
//! report and exits. Settings come from `--config <path>`, else
//! `./lockwise.toml` when present, else built-in defaults.

mod commands;
mod format;
mod parse;

use std::path::Path;
use std::process;

use lockwise_core::Result;
use lockwise_engine::{
    run_bank, run_counter, run_interleave, run_pipeline, CounterMode, HarnessConfig,
    CONFIG_FILE_NAME,
};
use tracing::Level;

use commands::build_cli;
use format::{
    format_bank, format_counter, format_error, format_interleave, format_pipeline, OutputMode,
};
use parse::{global_args, matches_to_action, CliAction};

fn main() {
    let matches = build_cli().get_matches();
    let globals = global_args(&matches);

    let output_mode = if globals.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    init_tracing(globals.verbose);

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    // Printing the defaults must work even when the local file is broken.
    if action == CliAction::PrintConfig {
        print!("{}", HarnessConfig::default_toml());
        return;
    }

    let config = match load_config(globals.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    if let Err(e) = run_action(&action, config, output_mode) {
        eprintln!("{}", format_error(&e, output_mode));
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&str>) -> Result<HarnessConfig> {
    match explicit {
        Some(path) => HarnessConfig::from_file(Path::new(path)),
        None => {
            let local = Path::new(CONFIG_FILE_NAME);
            if local.exists() {
                HarnessConfig::from_file(local)
            } else {
                Ok(HarnessConfig::default())
            }
        }
    }
}

fn run_action(action: &CliAction, mut config: HarnessConfig, mode: OutputMode) -> Result<()> {
    match action {
        CliAction::Counter(modes) => {
            for counter_mode in modes {
                let report = run_counter(&config.counter, *counter_mode)?;
                println!("{}", format_counter(&report, mode));
            }
        }
        CliAction::Pipeline => {
            println!("{}", format_pipeline(&run_pipeline(&config.pipeline)?, mode));
        }
        CliAction::Bank { seed } => {
            if seed.is_some() {
                config.bank.seed = *seed;
            }
            println!("{}", format_bank(&run_bank(&config.bank)?, mode));
        }
        CliAction::Interleave => {
            println!("{}", format_interleave(&run_interleave(&config.interleave)?, mode));
        }
        CliAction::All => {
            for counter_mode in [CounterMode::Guarded, CounterMode::Unguarded] {
                let report = run_counter(&config.counter, counter_mode)?;
                println!("{}", format_counter(&report, mode));
            }
            println!("{}", format_pipeline(&run_pipeline(&config.pipeline)?, mode));
            println!("{}", format_bank(&run_bank(&config.bank)?, mode));
            println!("{}", format_interleave(&run_interleave(&config.interleave)?, mode));
        }
        CliAction::PrintConfig => print!("{}", HarnessConfig::default_toml()),
    }
    Ok(())
}
