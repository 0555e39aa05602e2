//! A hypervisor that lives entirely in memory and remembers everything it was
//! asked to do. Backs `--dry-run` and the tests.

use super::{Hypervisor, VirtualMachine, VmState};
use anyhow::{Result, bail};
use startinstall_keys::KeyEvent;
use std::{cell::RefCell, rc::Rc};
use tracing::info;

/// One call received by a [`MemoryHypervisor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    Login,
    ListVms,
    State(String),
    Connect(String),
    KeyEvent(String, KeyEvent),
    Disconnect(String),
    Logoff,
    Deinit,
}

/// Shared view of the calls a [`MemoryHypervisor`] has received. Stays
/// readable after the hypervisor itself has been consumed by a session.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Only the key events, in delivery order.
    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::KeyEvent(_, event) => Some(*event),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryHypervisor {
    machines: Vec<(VirtualMachine, VmState)>,
    connected: Vec<String>,
    logged_in: bool,
    journal: Journal,
}

impl MemoryHypervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a machine with the given name and state.
    pub fn with_vm(mut self, name: &str, state: VmState) -> Self {
        let id = format!("{{memory-{}}}", self.machines.len());
        self.machines.push((
            VirtualMachine {
                id,
                name: name.to_string(),
            },
            state,
        ));
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    fn find(&self, vm: &VirtualMachine) -> Result<&VmState> {
        match self.machines.iter().find(|(candidate, _)| candidate.id == vm.id) {
            Some((_, state)) => Ok(state),
            None => bail!("Unknown virtual machine '{}'", vm.name),
        }
    }
}

impl Hypervisor for MemoryHypervisor {
    fn init(&mut self) -> Result<()> {
        self.journal.push(Call::Init);
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        self.journal.push(Call::Login);
        self.logged_in = true;
        Ok(())
    }

    fn list_vms(&mut self) -> Result<Vec<VirtualMachine>> {
        self.journal.push(Call::ListVms);
        if !self.logged_in {
            bail!("Not logged into the hypervisor");
        }
        Ok(self.machines.iter().map(|(vm, _)| vm.clone()).collect())
    }

    fn state(&mut self, vm: &VirtualMachine) -> Result<VmState> {
        self.journal.push(Call::State(vm.id.clone()));
        self.find(vm).cloned()
    }

    fn connect(&mut self, vm: &VirtualMachine) -> Result<()> {
        self.journal.push(Call::Connect(vm.id.clone()));
        self.find(vm)?;
        if !self.connected.contains(&vm.id) {
            self.connected.push(vm.id.clone());
        }
        Ok(())
    }

    fn send_key_event(&mut self, vm: &VirtualMachine, event: KeyEvent) -> Result<()> {
        if !self.connected.contains(&vm.id) {
            bail!("IO not connected to virtual machine");
        }
        info!(vm = %vm.name, scan_code = %event.scan_code(), "{}", event);
        self.journal.push(Call::KeyEvent(vm.id.clone(), event));
        Ok(())
    }

    fn disconnect(&mut self, vm: &VirtualMachine) -> Result<()> {
        self.journal.push(Call::Disconnect(vm.id.clone()));
        self.connected.retain(|id| *id != vm.id);
        Ok(())
    }

    fn logoff(&mut self) -> Result<()> {
        self.journal.push(Call::Logoff);
        self.logged_in = false;
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.journal.push(Call::Deinit);
        Ok(())
    }
}
