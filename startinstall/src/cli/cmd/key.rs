use crate::config::Config;
use crate::hypervisor::Hypervisor;
use crate::session::Session;
use anyhow::Result;
use std::process::ExitCode;
use tracing::error;

/// Press each key in order on the named machine.
pub fn press<H: Hypervisor>(
    session: &mut Session<H>,
    vm_name: &str,
    keys: &[String],
) -> Result<()> {
    // Resolve every key before connecting
    for key in keys {
        startinstall_keys::token(key)?;
    }

    let mut console = session.console(vm_name)?;
    for key in keys {
        console.send_key(key)?;
    }
    console.disconnect()
}

pub fn run(config: &Config, keys: Vec<String>) -> ExitCode {
    let result = config.open_session().and_then(|mut session| {
        press(&mut session, &config.vm_name, &keys)?;
        session.close()
    });

    match result {
        Err(err) => {
            error!(error = ?err, "Failed to send keys");
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}
