use std::ffi::OsString;
use std::path::{Path, PathBuf};

use khronos_egl as egl;

/// Initialization parameters for the framebuffer rendering context.
///
/// Keep this structure small. The demo runs with the defaults; fields exist so
/// tests and other boards can point at a different device.
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Framebuffer character device.
    pub device_path: PathBuf,

    /// Requested `EGL_BUFFER_SIZE` (total color bits per pixel).
    ///
    /// 16 matches the RGB565 framebuffers common on embedded boards.
    pub buffer_size: egl::Int,

    /// Requested `EGL_CONTEXT_CLIENT_VERSION`.
    pub client_version: egl::Int,

    /// Export `EGL_PLATFORM` / `FRAMEBUFFER` hints before the display is acquired.
    ///
    /// Existing values are never overwritten.
    pub export_platform_env: bool,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from("/dev/fb0"),
            buffer_size: 16,
            client_version: 2,
            export_platform_env: true,
        }
    }
}

impl ContextInit {
    /// Attribute list passed to `eglChooseConfig`.
    pub fn config_attribs(&self) -> [egl::Int; 5] {
        [
            egl::BUFFER_SIZE,
            self.buffer_size,
            egl::RENDERABLE_TYPE,
            egl::OPENGL_ES2_BIT,
            egl::NONE,
        ]
    }

    /// Attribute list passed to `eglCreateContext`.
    pub fn context_attribs(&self) -> [egl::Int; 3] {
        [egl::CONTEXT_CLIENT_VERSION, self.client_version, egl::NONE]
    }
}

/// Platform hint variables for fbdev EGL drivers.
///
/// Most drivers ignore them; some vendor stacks need them to select the
/// framebuffer backend.
pub fn platform_env(device_path: &Path) -> [(&'static str, OsString); 2] {
    [
        ("EGL_PLATFORM", OsString::from("fbdev")),
        ("FRAMEBUFFER", device_path.as_os_str().to_os_string()),
    ]
}

/// Sets each variable from [`platform_env`] that is not already present.
///
/// Must run before any other thread is spawned.
pub fn export_platform_env(device_path: &Path) {
    for (key, value) in platform_env(device_path) {
        if std::env::var_os(key).is_some() {
            log::debug!("{key} already set; leaving it untouched");
            continue;
        }
        // SAFETY: called during single-threaded startup, before EGL is loaded.
        unsafe { std::env::set_var(key, &value) };
        log::debug!("exported {key}={}", value.to_string_lossy());
    }
}
