use crate::hypervisor::{Hypervisor, VirtualMachine, VmState};
use anyhow::{Context, Result, anyhow, bail};
use startinstall_keys::{Key, KeyEvent, keystroke};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A logged-in connection to a hypervisor.
///
/// Opening a session initializes the client and logs into the local service;
/// [`Session::close`] undoes both. A session that is dropped without being
/// closed releases itself and logs any error.
pub struct Session<H: Hypervisor> {
    hypervisor: H,

    /// Pause after each keystroke
    key_delay: Duration,

    logged_in: bool,
    open: bool,
}

impl<H: Hypervisor> Session<H> {
    pub fn open(mut hypervisor: H) -> Result<Self> {
        debug!("Initializing hypervisor client");
        hypervisor
            .init()
            .context("Failed to initialize the hypervisor client")?;

        let mut session = Self {
            hypervisor,
            key_delay: Duration::ZERO,
            logged_in: false,
            open: true,
        };

        session
            .hypervisor
            .login()
            .context("Failed to log into the local hypervisor")?;
        session.logged_in = true;

        info!("Logged into hypervisor");
        Ok(session)
    }

    pub fn with_key_delay(mut self, key_delay: Duration) -> Self {
        self.key_delay = key_delay;
        self
    }

    /// Find a virtual machine by its exact name. The first match wins.
    pub fn find_vm(&mut self, name: &str) -> Result<VirtualMachine> {
        let vm = self
            .hypervisor
            .list_vms()?
            .into_iter()
            .find(|vm| vm.name == name)
            .ok_or_else(|| anyhow!("Unable to access virtual machine '{}'.", name))?;

        debug!(id = %vm.id, name = %vm.name, "Found virtual machine");
        Ok(vm)
    }

    /// Connect to the console of a running virtual machine.
    pub fn connect(&mut self, vm: &VirtualMachine) -> Result<Console<'_, H>> {
        let state = self.hypervisor.state(vm)?;
        if state != VmState::Running {
            bail!("Virtual machine '{}' is not running", vm.name);
        }

        self.hypervisor.connect(vm)?;
        info!(vm = %vm.name, "Connected to virtual machine");

        Ok(Console {
            session: self,
            vm: vm.clone(),
            connected: true,
        })
    }

    /// Find a virtual machine by name and connect to its console.
    pub fn console(&mut self, name: &str) -> Result<Console<'_, H>> {
        let vm = self.find_vm(name)?;
        self.connect(&vm)
    }

    /// Log off and deinitialize the client.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;

        let logoff = if self.logged_in {
            self.logged_in = false;
            self.hypervisor.logoff()
        } else {
            Ok(())
        };

        // Deinitialize even when logoff failed
        let deinit = self.hypervisor.deinit();
        debug!("Closed hypervisor session");
        logoff.and(deinit)
    }
}

impl<H: Hypervisor> Drop for Session<H> {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            warn!(error = ?error, "Failed to close hypervisor session");
        }
    }
}

/// The open keyboard channel of one virtual machine.
///
/// Disconnects when dropped if [`Console::disconnect`] was not called.
pub struct Console<'s, H: Hypervisor> {
    session: &'s mut Session<H>,
    vm: VirtualMachine,
    connected: bool,
}

impl<'s, H: Hypervisor> Console<'s, H> {
    pub fn vm(&self) -> &VirtualMachine {
        &self.vm
    }

    /// Deliver events in order, stopping at the first failure.
    pub fn send(&mut self, events: &[KeyEvent]) -> Result<()> {
        for event in events {
            self.session.hypervisor.send_key_event(&self.vm, *event)?;
        }
        Ok(())
    }

    /// Send the events of one keystroke, then pause for the key delay.
    fn stroke(&mut self, events: &[KeyEvent]) -> Result<()> {
        self.send(events)?;
        if !self.session.key_delay.is_zero() {
            std::thread::sleep(self.session.key_delay);
        }
        Ok(())
    }

    /// Send a single character or a named key such as "enter".
    pub fn send_key(&mut self, token: &str) -> Result<()> {
        self.stroke(&startinstall_keys::token(token)?)
    }

    pub fn send_enter(&mut self) -> Result<()> {
        self.send_key("enter")
    }

    /// Type text without a trailing Enter. Nothing is sent if any character
    /// cannot be typed.
    pub fn send_text(&mut self, text: &str) -> Result<()> {
        let strokes = text
            .chars()
            .map(keystroke)
            .collect::<Result<Vec<Vec<KeyEvent>>>>()?;

        debug!(vm = %self.vm.name, length = strokes.len(), "Typing text");
        for stroke in strokes {
            self.stroke(&stroke)?;
        }
        Ok(())
    }

    /// Type text followed by Enter.
    pub fn send_line(&mut self, text: &str) -> Result<()> {
        self.send_text(text)?;
        self.send_enter()
    }

    pub fn send_shortcut(&mut self, outer: Key, inner: Key, key: Key) -> Result<()> {
        debug!(vm = %self.vm.name, "Sending {}+{}+{}", outer, inner, key);
        self.stroke(&startinstall_keys::shortcut(outer, inner, key))
    }

    pub fn disconnect(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;

        self.session.hypervisor.disconnect(&self.vm)?;
        debug!(vm = %self.vm.name, "Disconnected from virtual machine");
        Ok(())
    }
}

impl<'s, H: Hypervisor> Drop for Console<'s, H> {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            warn!(error = ?error, vm = %self.vm.name, "Failed to disconnect from virtual machine");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypervisor::MemoryHypervisor;
    use crate::hypervisor::memory::Call;

    fn running(name: &str) -> MemoryHypervisor {
        MemoryHypervisor::new().with_vm(name, VmState::Running)
    }

    #[test]
    fn test_find_vm_by_exact_name() -> Result<()> {
        let mut session = Session::open(
            MemoryHypervisor::new()
                .with_vm("macOS Sonoma", VmState::Running)
                .with_vm("macOS", VmState::Running),
        )?;

        assert_eq!(session.find_vm("macOS")?.name, "macOS");
        assert_eq!(
            session.find_vm("macos").unwrap_err().to_string(),
            "Unable to access virtual machine 'macos'."
        );
        session.close()
    }

    #[test]
    fn test_connect_requires_running() -> Result<()> {
        let hypervisor = MemoryHypervisor::new().with_vm("macOS", VmState::Stopped);
        let journal = hypervisor.journal();
        let mut session = Session::open(hypervisor)?;

        let error = session.console("macOS").err().map(|error| error.to_string());
        assert_eq!(
            error.as_deref(),
            Some("Virtual machine 'macOS' is not running")
        );
        assert!(
            !journal
                .calls()
                .iter()
                .any(|call| matches!(call, Call::Connect(_)))
        );
        session.close()
    }

    #[test_log::test]
    fn test_send_line() -> Result<()> {
        let hypervisor = running("macOS");
        let journal = hypervisor.journal();
        let mut session = Session::open(hypervisor)?;

        let mut console = session.console("macOS")?;
        console.send_line("ls -a")?;
        console.disconnect()?;
        session.close()?;

        assert_eq!(journal.key_events(), startinstall_keys::line("ls -a")?);
        Ok(())
    }

    #[test]
    fn test_unmappable_text_sends_nothing() -> Result<()> {
        let hypervisor = running("macOS");
        let journal = hypervisor.journal();
        let mut session = Session::open(hypervisor)?;

        let mut console = session.console("macOS")?;
        assert!(console.send_text("abc€").is_err());
        assert!(journal.key_events().is_empty());
        Ok(())
    }

    #[test]
    fn test_key_delay_applies_to_every_send() -> Result<()> {
        let delay = Duration::from_millis(20);
        let mut session = Session::open(running("macOS"))?.with_key_delay(delay);
        let mut console = session.console("macOS")?;

        let start = std::time::Instant::now();
        console.send_key("a")?;
        console.send_key("enter")?;
        console.send_shortcut(Key::CmdLeft, Key::ShiftLeft, Key::T)?;
        assert!(start.elapsed() >= delay * 3);

        console.disconnect()?;
        session.close()
    }

    #[test]
    fn test_drop_releases_everything() -> Result<()> {
        let hypervisor = running("macOS");
        let journal = hypervisor.journal();

        {
            let mut session = Session::open(hypervisor)?;
            let mut console = session.console("macOS")?;
            console.send_key("a")?;
        }

        let calls = journal.calls();
        let tail = &calls[calls.len() - 3..];
        assert!(matches!(tail[0], Call::Disconnect(_)));
        assert_eq!(tail[1], Call::Logoff);
        assert_eq!(tail[2], Call::Deinit);
        Ok(())
    }

    #[test]
    fn test_close_is_not_repeated_on_drop() -> Result<()> {
        let hypervisor = running("macOS");
        let journal = hypervisor.journal();
        Session::open(hypervisor)?.close()?;

        assert_eq!(
            journal.calls(),
            vec![Call::Init, Call::Login, Call::Logoff, Call::Deinit]
        );
        Ok(())
    }
}
