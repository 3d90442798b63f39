use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::Error;

/// Process-wide keep-running flag. Cleared by `SIGINT`.
static KEEP_RUNNING: AtomicBool = AtomicBool::new(true);

extern "C" fn on_interrupt(_signal: c_int) {
    // Only an atomic store: async-signal-safe.
    KEEP_RUNNING.store(false, Ordering::SeqCst);
}

/// Installs the `SIGINT` handler and returns the flag it clears.
///
/// Interrupted syscalls are restarted so a blocking present is not cut short.
pub fn install_interrupt_handler() -> Result<&'static AtomicBool, Error> {
    let action = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: `on_interrupt` performs a single atomic store.
    unsafe { sigaction(Signal::SIGINT, &action) }.map_err(Error::SignalInstall)?;
    log::debug!("SIGINT handler installed");
    Ok(&KEEP_RUNNING)
}

/// The flag cleared by the interrupt handler.
pub fn keep_running() -> &'static AtomicBool {
    &KEEP_RUNNING
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::raise;

    #[test]
    fn sigint_clears_the_flag() {
        let flag = install_interrupt_handler().unwrap();
        assert!(std::ptr::eq(flag, keep_running()));
        assert!(flag.load(Ordering::SeqCst));

        raise(Signal::SIGINT).unwrap();
        assert!(!flag.load(Ordering::SeqCst));

        flag.store(true, Ordering::SeqCst);
    }
}
