#![allow(dead_code)]

use std::error::Error;

pub use gale_test_utils::{init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn Error>>;

/// Whether `pid` names a live process. Zombies count as dead.
#[cfg(unix)]
pub fn process_alive(pid: u32) -> bool {
    if cfg!(target_os = "linux") {
        return match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
            // The state letter follows the parenthesised command name.
            Ok(stat) => !stat
                .rsplit(')')
                .next()
                .is_some_and(|rest| rest.trim_start().starts_with('Z')),
            Err(_) => false,
        };
    }
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
}
