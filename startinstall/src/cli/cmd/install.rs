use super::InstallArgs;
use crate::config::Config;
use crate::install::{self, InstallPlan};
use anyhow::Result;
use std::{process::ExitCode, time::Duration};
use tracing::{error, info};
use validator::Validate;

fn install(config: &Config, args: &InstallArgs) -> Result<()> {
    args.validate()?;

    let plan = InstallPlan {
        vm_name: config.vm_name.clone(),
        command: args.install_command.clone(),
        delay: Duration::from_secs(args.delay),
    };

    let mut session = config.open_session()?;
    install::run(&mut session, &plan)?;
    session.close()
}

pub fn run(config: &Config, args: &InstallArgs) -> ExitCode {
    match install(config, args) {
        Err(err) => {
            error!(error = ?err, "Failed to start the install");
            ExitCode::FAILURE
        }
        _ => {
            info!(vm = %config.vm_name, "Install command sent");
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_run() -> Config {
        Config {
            vm_name: "macOS".to_string(),
            sdk_library: None,
            key_delay: 0,
            dry_run: true,
            debug: false,
        }
    }

    fn args(command: &str) -> InstallArgs {
        InstallArgs {
            install_command: command.to_string(),
            delay: 0,
        }
    }

    #[test_log::test]
    fn test_run_exit_codes() {
        assert_eq!(run(&dry_run(), &args("/tmp/install")), ExitCode::SUCCESS);
        assert_eq!(run(&dry_run(), &args("")), ExitCode::FAILURE);

        let missing = Config {
            vm_name: String::new(),
            ..dry_run()
        };
        assert_eq!(run(&missing, &args("/tmp/install")), ExitCode::FAILURE);
    }
}
