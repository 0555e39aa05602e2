//! Parallels Desktop driven through its `prlctl` command-line client.
//!
//! Key events go out as `prlctl send-key-event <uuid> --scancode <code>
//! --event press|release`, one process per event. Codes are PC/AT set 1
//! written in decimal. Extended keys are passed as their full `0xE0xx`
//! value, so left command (`0xe05b`) becomes `--scancode 57435`. This assumes
//! prlctl accepts the prefixed code in that form; it has not been checked
//! against every prlctl release. A click is a press followed by a release.

use super::{Hypervisor, VirtualMachine, VmState};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use startinstall_keys::{KeyAction, KeyEvent};
use std::{path::PathBuf, process::Command};
use tracing::{debug, trace};

/// One entry of `prlctl list --all --json`.
#[derive(Deserialize, Debug)]
struct ListEntry {
    uuid: String,
    name: String,
}

fn parse_list(stdout: &str) -> Result<Vec<VirtualMachine>> {
    let entries: Vec<ListEntry> =
        serde_json::from_str(stdout).context("Failed to parse the virtual machine list")?;

    Ok(entries
        .into_iter()
        .map(|entry| VirtualMachine {
            id: entry.uuid,
            name: entry.name,
        })
        .collect())
}

/// Parse `prlctl status` output such as "VM macOS exist running".
fn parse_status(stdout: &str) -> Result<VmState> {
    let state = stdout
        .split_whitespace()
        .last()
        .ok_or_else(|| anyhow!("Empty status output"))?;

    Ok(state
        .parse::<VmState>()
        .unwrap_or_else(|_| VmState::Other(state.to_string())))
}

#[derive(Debug)]
pub struct PrlctlHypervisor {
    /// The `prlctl` executable
    pub program: PathBuf,

    /// Machines whose console is currently open
    connected: Vec<String>,
}

impl PrlctlHypervisor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            connected: vec![],
        }
    }

    /// Run prlctl with the given arguments and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = ?self.program, args = ?args, "Running prlctl");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "prlctl {} failed ({}): {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn key(&self, vm: &VirtualMachine, event: &KeyEvent, action: &str) -> Result<()> {
        let code = event.scan_code().0.to_string();
        trace!(key = %event.key, code = %code, action, "Sending key event");
        self.run(&[
            "send-key-event",
            vm.id.as_str(),
            "--scancode",
            code.as_str(),
            "--event",
            action,
        ])?;
        Ok(())
    }
}

impl Default for PrlctlHypervisor {
    fn default() -> Self {
        Self::new("prlctl")
    }
}

impl Hypervisor for PrlctlHypervisor {
    fn init(&mut self) -> Result<()> {
        let version = self.run(&["--version"])?;
        debug!(version = version.trim(), "Found prlctl");
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        // The local service has no separate login; any query proves it answers
        self.run(&["list", "--all", "--json"])?;
        Ok(())
    }

    fn list_vms(&mut self) -> Result<Vec<VirtualMachine>> {
        parse_list(&self.run(&["list", "--all", "--json"])?)
    }

    fn state(&mut self, vm: &VirtualMachine) -> Result<VmState> {
        parse_status(&self.run(&["status", vm.id.as_str()])?)
    }

    fn connect(&mut self, vm: &VirtualMachine) -> Result<()> {
        if !self.connected.contains(&vm.id) {
            self.connected.push(vm.id.clone());
        }
        Ok(())
    }

    fn send_key_event(&mut self, vm: &VirtualMachine, event: KeyEvent) -> Result<()> {
        if !self.connected.contains(&vm.id) {
            bail!("IO not connected to virtual machine");
        }

        match event.action {
            KeyAction::Press => self.key(vm, &event, "press"),
            KeyAction::Release => self.key(vm, &event, "release"),
            KeyAction::Click => {
                self.key(vm, &event, "press")?;
                self.key(vm, &event, "release")
            }
        }
    }

    fn disconnect(&mut self, vm: &VirtualMachine) -> Result<()> {
        self.connected.retain(|id| *id != vm.id);
        Ok(())
    }

    fn logoff(&mut self) -> Result<()> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        self.connected.clear();
        Ok(())
    }
}
