use crate::hypervisor::{Backend, MemoryHypervisor, PrlctlHypervisor, VmState};
use crate::session::Session;
use anyhow::Result;
use std::{path::PathBuf, time::Duration};
use tracing::{debug, warn};
use validator::Validate;

/// Settings shared by every command. Each one can also come from the
/// environment.
#[derive(clap::Args, Debug, Clone, Validate)]
pub struct Config {
    /// Name of the virtual machine to type into
    #[clap(long = "vm", env = "VM_NAME", default_value = "macOS", global = true)]
    #[validate(length(min = 1))]
    pub vm_name: String,

    /// Path to the Parallels SDK client (prlctl)
    #[clap(long, env = "SDK_LIBRARY", global = true)]
    pub sdk_library: Option<PathBuf>,

    /// Milliseconds to wait after each keystroke
    #[clap(long, default_value_t = 0, global = true)]
    pub key_delay: u64,

    /// Log the key events instead of sending them to a hypervisor
    #[clap(long, num_args = 0, global = true)]
    pub dry_run: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(long, num_args = 0, global = true)]
    pub debug: bool,
}

impl Config {
    /// Choose the hypervisor implementation for this run.
    pub fn backend(&self) -> Backend {
        if self.dry_run {
            debug!(vm = %self.vm_name, "Using an in-memory hypervisor");
            return MemoryHypervisor::new()
                .with_vm(&self.vm_name, VmState::Running)
                .into();
        }

        match &self.sdk_library {
            Some(path) => PrlctlHypervisor::new(path).into(),
            None => {
                warn!("The SDK_LIBRARY environment variable is not set. This may not work.");
                PrlctlHypervisor::default().into()
            }
        }
    }

    /// Validate the settings and open a hypervisor session with them.
    pub fn open_session(&self) -> Result<Session<Backend>> {
        self.validate()?;
        Ok(Session::open(self.backend())?.with_key_delay(Duration::from_millis(self.key_delay)))
    }
}
