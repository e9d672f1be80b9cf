//! Config validation CLI tool
//!
//! Validates a drowse configuration file and reports any errors.

use drowse_util::{default_config_path, format_duration};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a drowse configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match drowse_config::load_config(&config_path) {
        Ok(settings) => {
            let general = &settings.general;
            let commands = &settings.commands;

            println!("✓ Configuration is valid");
            println!();
            println!("Timing:");
            println!("  Idle time:      {}", format_duration(general.idle_time));
            println!("  Min sleep time: {}", format_duration(general.min_sleep_time));
            println!("  Wakeup delta:   {}", format_duration(general.wakeup_delta));
            println!("  Interval:       {}s", general.interval.as_secs());
            println!("  Woke-up marker: {}", general.woke_up_file.display());
            println!();
            println!("Commands:");
            println!("  suspend:          {}", commands.suspend);
            if let Some(wakeup) = &commands.wakeup {
                println!("  wakeup:           {}", wakeup);
            }
            if let Some(notify) = &commands.notify_wakeup {
                println!("  notify (wakeup):  {}", notify);
            }
            if let Some(notify) = &commands.notify_no_wakeup {
                println!("  notify (none):    {}", notify);
            }

            let sections = [
                ("Activity probes", &settings.activities),
                ("Wake probes", &settings.wakeups),
            ];
            for (title, specs) in sections {
                if specs.is_empty() {
                    continue;
                }
                println!();
                println!("{}:", title);
                for spec in specs {
                    println!("  - {} [{}]", spec.name, spec.class);
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                drowse_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                drowse_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                drowse_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                drowse_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        drowse_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
