//! Ministack - a minimalist stack declaration tool
//!
//! This is the main entry point for the ministack CLI.

use anyhow::Result;
use ministack::cli::{commands, Cli, Commands};
use ministack::error::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbosity());

    let exit_code = match &cli.command {
        Commands::Synth => run(commands::synth(&cli)),
        Commands::Config => run(commands::config(&cli)),
        Commands::Variants => commands::variants(),
    };

    std::process::exit(exit_code);
}

fn run(result: ministack::error::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    }
}

fn report(e: &Error) {
    eprintln!("Error: {}", e);
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbosity >= 3))
        .with(env_filter)
        .init();
}
