use std::io;
use std::path::PathBuf;

use crate::render::{InfoLog, ShaderStage};

/// Broad failure category, used to pick the process exit status.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailureClass {
    /// The framebuffer device could not be opened or queried. Soft failure.
    DeviceUnavailable,
    /// Any EGL step (including presentation) failed.
    ContextAcquisition,
    /// A shader stage failed to compile or the program failed to link.
    ShaderBuild,
    /// A required vertex attribute is absent from the linked program.
    AttributeBinding,
    /// Process-level setup outside the graphics stack (signal handling).
    Platform,
}

impl FailureClass {
    /// Process exit status for this class.
    ///
    /// A missing framebuffer is treated as "nothing to do" and exits cleanly.
    pub const fn exit_status(self) -> u8 {
        match self {
            FailureClass::DeviceUnavailable => 0,
            _ => 1,
        }
    }
}

/// Errors raised while bringing up or driving the framebuffer renderer.
///
/// Messages do not repeat their `source`; print the chain (`{:#}` through
/// anyhow) to see the underlying OS or EGL error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("open {} failed", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ioctl FBIOGET_VSCREENINFO on {} failed", .path.display())]
    GeometryQuery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load the EGL library: {0}")]
    EglLoad(String),

    #[error("{call} failed")]
    Egl {
        call: &'static str,
        #[source]
        source: khronos_egl::Error,
    },

    #[error("{call} failed: {what}")]
    EglMissing {
        call: &'static str,
        what: &'static str,
    },

    #[error("failed to compile {stage} shader:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: InfoLog },

    #[error("failed to link shader program:\n{log}")]
    ProgramLink { log: InfoLog },

    #[error("vertex attribute `{name}` not found in linked program")]
    MissingAttribute { name: &'static str },

    #[error("failed to create GL {object}: {reason}")]
    GlCreate { object: &'static str, reason: String },

    #[error("failed to install SIGINT handler")]
    SignalInstall(#[source] nix::errno::Errno),
}

impl Error {
    pub fn class(&self) -> FailureClass {
        match self {
            Error::DeviceOpen { .. } | Error::GeometryQuery { .. } => {
                FailureClass::DeviceUnavailable
            }
            Error::EglLoad(_) | Error::Egl { .. } | Error::EglMissing { .. } => {
                FailureClass::ContextAcquisition
            }
            Error::ShaderCompile { .. } | Error::ProgramLink { .. } | Error::GlCreate { .. } => {
                FailureClass::ShaderBuild
            }
            Error::MissingAttribute { .. } => FailureClass::AttributeBinding,
            Error::SignalInstall(_) => FailureClass::Platform,
        }
    }

    /// Shorthand for `self.class().exit_status()`.
    pub fn exit_status(&self) -> u8 {
        self.class().exit_status()
    }
}
