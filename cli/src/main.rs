//! Pied Piper CLI - run pipelines from the command line
//!
//! # Commands
//! - `piper run [STEP...]` - Pipe a seed through steps and print the result
//!
//!   Steps that start with `-` must follow `--`: `piper run --seed 5 -- -:1`
//! - `piper capabilities <VALUE>` - List what a value responds to

mod capabilities;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Pied Piper CLI
#[derive(Parser)]
#[command(name = "piper")]
#[command(author, version, about = "Pipe values through capabilities")]
struct Cli {
    /// Log each step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pipe a seed through steps and print the final value
    Run {
        /// Steps: `name`, `name:arg,arg` or a JSON array `["name", arg, ...]`.
        /// Put steps starting with `-` after `--`
        steps: Vec<String>,

        /// Initial value (JSON, or plain text when it is not valid JSON)
        #[arg(short, long)]
        seed: Option<String>,

        /// Recipe file (TOML, or JSON with a `.json` extension); CLI steps run after its steps
        #[arg(short, long)]
        recipe: Option<String>,

        /// Pipe configuration file (TOML)
        #[arg(short, long)]
        config: Option<String>,

        /// Print the result as JSON instead of its text form
        #[arg(long)]
        json: bool,
    },

    /// List the capabilities a value responds to
    Capabilities {
        /// Sample value (JSON, or plain text when it is not valid JSON)
        value: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            steps,
            seed,
            recipe,
            config,
            json,
        } => {
            let request = run::RunRequest {
                steps,
                seed,
                recipe,
                config,
            };
            let value = run::run_pipeline(&request)?;
            println!("{}", run::render(&value, json)?);
        }
        Commands::Capabilities { value } => {
            for name in capabilities::list(&value) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_steps(argv: &[&str]) -> Vec<String> {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run { steps, .. } => steps,
            Commands::Capabilities { .. } => panic!("expected the run command"),
        }
    }

    #[test]
    fn test_hyphen_steps_after_separator() {
        let steps = run_steps(&["piper", "run", "--seed", "5", "--", "-:1", "succ"]);
        assert_eq!(steps, vec!["-:1", "succ"]);

        let request = run::RunRequest {
            steps,
            seed: Some("5".to_string()),
            recipe: None,
            config: None,
        };
        let value = run::run_pipeline(&request).unwrap();
        assert_eq!(run::render(&value, false).unwrap(), "5");
    }

    #[test]
    fn test_hyphen_step_without_separator_is_a_flag() {
        assert!(Cli::try_parse_from(["piper", "run", "--seed", "5", "-:1"]).is_err());
    }
}
