use crate::config::Config;
use clap::Parser;

pub mod cmd;

use cmd::{Commands, InstallArgs};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CommandLine {
    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[clap(flatten)]
    pub install: InstallArgs,

    #[clap(flatten)]
    pub config: Config,
}

impl CommandLine {
    /// The command to run, defaulting to `install`.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Install {})
    }
}
