//! `timerec` - CLI for the recording-timer scheduler
//!
//! `timerec run` starts the interactive operator menu on stdin/stdout;
//! `timerec config` inspects the configuration it would use.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;

use timerec::cli::{Cli, Command, ConfigCommand, RunCommand};
use timerec::{init_logging, Config, Console, RecordStore, Session, SystemClock, Watchdog};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Validation waits until `run` flags have been layered on top
    let config = Config::extract_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Run(run_cmd) => handle_run(config, &run_cmd),
        Command::Config(config_cmd) => {
            config.validate().context("loading configuration")?;
            handle_config(&config, config_cmd)
        }
    }
}

fn handle_run(mut config: Config, cmd: &RunCommand) -> anyhow::Result<()> {
    cmd.apply(&mut config);
    config.validate()?;

    let store = RecordStore::new(config.capacity()?)?;
    let mut watchdog = Watchdog::new(SystemClock::new(), config.watchdog_timeout());
    if config.watchdog.enabled {
        watchdog.init();
    }

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    Session::new(console, store, watchdog)
        .run()
        .context("operator session failed")
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", config.to_json_pretty()?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Capacity:           {}", config.store.capacity);
                println!();
                println!("[Watchdog]");
                println!("  Enabled:            {}", config.watchdog.enabled);
                println!("  Timeout (seconds):  {}", config.watchdog.timeout_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
