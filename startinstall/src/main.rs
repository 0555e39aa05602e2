use clap::Parser;
use startinstall::built_info;
use startinstall::cli::CommandLine;
use startinstall::cli::cmd::{self, Commands};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn main() -> ExitCode {
    // Parse command line options before we configure logging so we can set the
    // default level
    let command_line = CommandLine::parse();

    // Configure logging
    let default_filter = if command_line.config.debug {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    debug!(
        version = built_info::PKG_VERSION,
        rustc = built_info::RUSTC_VERSION,
        "Starting startinstall"
    );

    // Dispatch command
    let config = &command_line.config;
    match command_line.command() {
        Commands::Install {} => cmd::install::run(config, &command_line.install),
        Commands::Type { text, no_enter } => cmd::text::run(config, text, no_enter),
        Commands::Key { keys } => cmd::key::run(config, keys),
        Commands::Keys {} => cmd::keys::run(),
    }
}
