//! Process-level control: the interrupt flag and the render loop driven by it.
//!
//! The loop has two states, running and stopping. The only transition is
//! `SIGINT`, observed at the top of the next iteration.

mod run_loop;
mod signal;

pub use run_loop::{run_until_interrupted, LoopState};
pub use signal::{install_interrupt_handler, keep_running};
