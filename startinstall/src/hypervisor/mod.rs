//! The virtualization service we type into.
//!
//! Everything the installer needs from a hypervisor fits in [`Hypervisor`]:
//! enumerate machines, check that one is running, open its console and push
//! key events through it.

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use startinstall_keys::KeyEvent;
use strum::{Display, EnumString};

pub mod memory;
pub mod prlctl;

pub use memory::MemoryHypervisor;
pub use prlctl::PrlctlHypervisor;

/// A virtual machine as enumerated by the hypervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachine {
    /// Stable identifier used to address the machine
    pub id: String,

    /// Human readable name
    pub name: String,
}

/// Run state of a virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VmState {
    Running,
    Stopped,
    Suspended,
    Paused,
    #[strum(default)]
    Other(String),
}

/// Operations the installer performs against a virtualization service.
///
/// Calls happen in lifecycle order: `init`, `login`, any number of queries
/// and connections, `logoff`, `deinit`. Key events are only accepted for a
/// machine between `connect` and `disconnect`.
#[enum_dispatch(Backend)]
pub trait Hypervisor {
    /// Initialize the client library.
    fn init(&mut self) -> Result<()>;

    /// Log into the local service.
    fn login(&mut self) -> Result<()>;

    /// Enumerate every registered virtual machine.
    fn list_vms(&mut self) -> Result<Vec<VirtualMachine>>;

    fn state(&mut self, vm: &VirtualMachine) -> Result<VmState>;

    /// Open the console I/O channel of a machine.
    fn connect(&mut self, vm: &VirtualMachine) -> Result<()>;

    /// Deliver one event to the keyboard of a connected machine.
    fn send_key_event(&mut self, vm: &VirtualMachine, event: KeyEvent) -> Result<()>;

    fn disconnect(&mut self, vm: &VirtualMachine) -> Result<()>;

    fn logoff(&mut self) -> Result<()>;

    fn deinit(&mut self) -> Result<()>;
}

/// The hypervisor implementations the command line can select.
#[enum_dispatch]
#[derive(Debug)]
pub enum Backend {
    PrlctlHypervisor,
    MemoryHypervisor,
}
