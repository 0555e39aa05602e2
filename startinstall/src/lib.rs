pub mod cli;
pub mod config;
pub mod hypervisor;
pub mod install;
pub mod session;

/// Build info
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
