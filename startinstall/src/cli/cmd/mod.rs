use validator::Validate;

pub mod install;
pub mod key;
pub mod keys;
pub mod text;

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open a Terminal from macOS Recovery and run the install command (default)
    Install {},

    /// Type text into the virtual machine
    Type {
        #[clap(index = 1)]
        text: String,

        /// Do not press Enter after the text
        #[clap(long, num_args = 0)]
        no_enter: bool,
    },

    /// Press keys by name ("enter", "F5") or by character
    Key {
        #[clap(index = 1, required = true, num_args = 1..)]
        keys: Vec<String>,
    },

    /// List the keys that can be pressed by name
    Keys {},
}

/// Install settings. Accepted before or after any subcommand.
#[derive(clap::Args, Debug, Clone, Validate)]
pub struct InstallArgs {
    /// The command typed into the recovery Terminal
    #[clap(
        long = "command",
        env = "INSTALL_COMMAND",
        default_value = "/Volumes/Image Volume/install",
        global = true
    )]
    #[validate(length(min = 1))]
    pub install_command: String,

    /// Seconds to give the guest after each step
    #[clap(long, default_value_t = 5, global = true)]
    pub delay: u64,
}
