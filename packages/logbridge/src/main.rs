use std::path::PathBuf;

use clap::{Parser, Subcommand};

use logbridge::inspect::{inspect, syslog_priority};
use logbridge::{ComponentRegistry, EnvLookup};

/// logbridge - inspect legacy log4j.properties configurations
#[derive(Parser, Debug)]
#[command(name = "logbridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a configuration and report anything that was left out
    Check {
        path: PathBuf,

        /// Exit non-zero when any diagnostic is reported
        #[arg(long)]
        strict: bool,
    },

    /// Print the translated configuration
    Dump {
        path: PathBuf,

        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Compute a syslog <PRI> value
    Priority {
        facility: String,

        /// Severity name (e.g. WARNING) or code 0-7
        severity: String,
    },

    /// List the component types the built-in registry knows
    Types,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ComponentRegistry::with_defaults();
    match command {
        Command::Check { path, strict } => {
            let report = inspect(&path, &registry, &EnvLookup)?;
            print!("{}", report);
            if strict && !report.is_clean() {
                std::process::exit(2);
            }
        }
        Command::Dump { path, json } => {
            let report = inspect(&path, &registry, &EnvLookup)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Command::Priority { facility, severity } => {
            println!("{}", syslog_priority(&facility, &severity)?);
        }
        Command::Types => {
            let (appenders, filters, layouts) = registry.type_names();
            for (kind, names) in [("appender", appenders), ("filter", filters), ("layout", layouts)] {
                for name in names {
                    println!("{:<9}{}", kind, name);
                }
            }
        }
    }
    Ok(())
}
