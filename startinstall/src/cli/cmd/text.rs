use crate::config::Config;
use crate::hypervisor::Hypervisor;
use crate::session::Session;
use anyhow::Result;
use std::process::ExitCode;
use tracing::error;

/// Type text on the named machine, followed by Enter unless `enter` is false.
pub fn type_text<H: Hypervisor>(
    session: &mut Session<H>,
    vm_name: &str,
    text: &str,
    enter: bool,
) -> Result<()> {
    let mut console = session.console(vm_name)?;
    if enter {
        console.send_line(text)?;
    } else {
        console.send_text(text)?;
    }
    console.disconnect()
}

pub fn run(config: &Config, text: String, no_enter: bool) -> ExitCode {
    let result = config.open_session().and_then(|mut session| {
        type_text(&mut session, &config.vm_name, &text, !no_enter)?;
        session.close()
    });

    match result {
        Err(err) => {
            error!(error = ?err, "Failed to type text");
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypervisor::{MemoryHypervisor, VmState};

    fn dry_run() -> Config {
        Config {
            vm_name: "macOS".to_string(),
            sdk_library: None,
            key_delay: 0,
            dry_run: true,
            debug: false,
        }
    }

    #[test]
    fn test_no_enter_omits_enter() -> Result<()> {
        let hypervisor = MemoryHypervisor::new().with_vm("macOS", VmState::Running);
        let journal = hypervisor.journal();
        let mut session = Session::open(hypervisor)?;

        type_text(&mut session, "macOS", "ls", false)?;
        assert_eq!(journal.key_events(), startinstall_keys::text("ls")?);

        type_text(&mut session, "macOS", "ls", true)?;
        let mut expected = startinstall_keys::text("ls")?;
        expected.extend(startinstall_keys::line("ls")?);
        assert_eq!(journal.key_events(), expected);

        session.close()
    }

    #[test]
    fn test_run_exit_codes() {
        assert_eq!(run(&dry_run(), "echo".to_string(), false), ExitCode::SUCCESS);
        assert_eq!(run(&dry_run(), "café".to_string(), false), ExitCode::FAILURE);

        let missing = Config {
            vm_name: String::new(),
            ..dry_run()
        };
        assert_eq!(run(&missing, "echo".to_string(), false), ExitCode::FAILURE);
    }
}
