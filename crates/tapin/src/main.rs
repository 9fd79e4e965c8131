// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tapin - QR attendance kiosk for school check-in and check-out.
//!
//! This is the binary entry point for the kiosk.

use clap::{Parser, Subcommand};

mod badge;
mod scanner;
mod serve;
mod shutdown;

/// Tapin - QR attendance kiosk.
#[derive(Parser, Debug)]
#[command(name = "tapin", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the kiosk: scan badges and record attendance.
    Serve,
    /// Render the badge QR payload for a student identifier.
    Badge {
        /// Plain student identifier, e.g. S001.
        student_id: String,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match tapin_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tapin_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Badge { student_id }) => badge::run_badge(&config, &student_id),
        Some(Commands::Config) => run_config(&config),
        None => {
            println!("tapin: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Print the resolved configuration as TOML.
fn run_config(config: &tapin_config::model::TapinConfig) -> Result<(), tapin_core::KioskError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| tapin_core::KioskError::Internal(format!("cannot render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = tapin_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.kiosk.name, "tapin");
        assert_eq!(config.kiosk.sentinel_prefix, "mvba_");
    }
}
