//! fbgl engine crate.
//!
//! OpenGL ES 2 on a Linux framebuffer device through EGL, with no windowing
//! system in between. Owns the device, context and GL pieces used by the
//! `fbgl-quad` binary.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;

mod error;
mod pipeline;

#[cfg(test)]
mod testing;

pub use error::{Error, FailureClass};
pub use pipeline::{run, run_with, RunSummary};
