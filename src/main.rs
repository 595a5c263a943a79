//! fitloop CLI
//!
//! Declarative training runs driven by a YAML configuration.
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! fitloop fit fit.yaml
//!
//! # Train with overrides, saving the history
//! fitloop fit fit.yaml --epochs 10 --lr 0.01 -o history.json
//!
//! # Validate config
//! fitloop validate fit.yaml --detailed
//!
//! # Show config info
//! fitloop info fit.yaml --format json
//! ```

use clap::Parser;
use fitloop::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
