use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Canopy test harness driver.
///
/// Test suites are ordinary binaries built against the canopy harness
/// library; each one reports its lifecycle events on stderr and exits
/// nonzero when any test failed. This driver launches those binaries in
/// order and combines their outcomes into one exit status.
///
/// EXAMPLES:
///     canopy run target/debug/api-tests       Run one suite binary
///     canopy run a-tests b-tests c-tests      Run several in order
///     canopy run api-tests --no-color         Plain output
///
/// ENVIRONMENT VARIABLES:
///     NO_COLOR          Set to disable colored output
#[derive(Parser)]
#[command(name = "canopy")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more compiled test binaries
    ///
    /// Each binary runs to completion before the next starts; their
    /// output streams through untouched. The driver exits nonzero if
    /// any binary fails to launch or exits nonzero.
    ///
    /// EXAMPLES:
    ///     canopy run target/debug/api-tests
    ///     canopy run a-tests b-tests --no-color
    #[command(visible_alias = "r")]
    Run {
        /// Paths to test binaries, executed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Disable colored output (forwarded to the test binaries)
        #[arg(
            long,
            env = "NO_COLOR",
            value_parser = clap::builder::BoolishValueParser::new(),
            num_args = 0..=1,
            default_value_t = false,
            default_missing_value = "true",
        )]
        no_color: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { files, no_color } => {
            let failures = commands::run::run(&files, no_color)?;
            if failures > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
