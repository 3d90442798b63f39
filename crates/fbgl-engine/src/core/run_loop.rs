use std::sync::atomic::{AtomicBool, Ordering};

use crate::Error;

/// Render loop state, sampled once per iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Stopping,
}

impl LoopState {
    /// Reads the keep-running flag written by the interrupt handler.
    #[inline]
    pub fn observe(keep_running: &AtomicBool) -> Self {
        if keep_running.load(Ordering::SeqCst) {
            LoopState::Running
        } else {
            LoopState::Stopping
        }
    }
}

/// Calls `frame` until `keep_running` is cleared.
///
/// The flag is checked at the top of each iteration only, so a frame that has
/// started always completes (including presentation). Returns the number of
/// completed frames. A failing frame ends the loop with its error.
pub fn run_until_interrupted<F>(keep_running: &AtomicBool, mut frame: F) -> Result<u64, Error>
where
    F: FnMut() -> Result<(), Error>,
{
    let mut frames: u64 = 0;
    while LoopState::observe(keep_running) == LoopState::Running {
        frame()?;
        frames = frames.wrapping_add(1);
    }
    log::debug!("render loop stopped after {frames} frames");
    Ok(frames)
}
