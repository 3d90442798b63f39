//! Framebuffer device + EGL context management.
//!
//! This module is responsible for:
//! - opening the framebuffer device and reading its geometry
//! - loading EGL and binding a GLES2 context to the device (no window system)
//! - releasing context, surface, display and device in a fixed order

mod context;
mod egl;
mod fb;
mod init;
mod session;

pub use context::RenderContext;
pub use egl::{EglApi, EglLib};
pub use fb::{Framebuffer, FramebufferDevice, ScreenGeometry};
pub use init::{export_platform_env, platform_env, ContextInit};
pub use session::Session;
