//! Starts an unattended install from the macOS Recovery screen.

use crate::hypervisor::Hypervisor;
use crate::session::Session;
use anyhow::Result;
use startinstall_keys::Key;
use std::time::Duration;
use tracing::{debug, info};

pub struct InstallPlan {
    /// Name of the virtual machine sitting at the recovery screen
    pub vm_name: String,

    /// Command typed into the recovery Terminal
    pub command: String,

    /// How long the guest gets to react after each step
    pub delay: Duration,
}

fn wait(delay: Duration) {
    if !delay.is_zero() {
        debug!("Waiting {:?}", delay);
        std::thread::sleep(delay);
    }
}

/// Dismiss the recovery greeting, open a Terminal with Cmd+Shift+T and run
/// the install command in it.
pub fn run<H: Hypervisor>(session: &mut Session<H>, plan: &InstallPlan) -> Result<()> {
    let mut console = session.console(&plan.vm_name)?;

    console.send_enter()?;
    wait(plan.delay);

    info!("Opening Terminal");
    console.send_shortcut(Key::CmdLeft, Key::ShiftLeft, Key::T)?;
    wait(plan.delay);

    info!(command = %plan.command, "Running install command");
    console.send_line(&plan.command)?;

    console.disconnect()
}
