use std::ffi::c_void;

use super::{ContextInit, EglApi};
use crate::Error;

/// Handles acquired so far. Dropping releases whatever is present, in
/// reverse dependency order, so a failure at any step leaks nothing.
struct Handles<E: EglApi> {
    egl: E,
    display: E::Display,
    context: Option<E::Context>,
    surface: Option<E::Surface>,
    current: bool,
}

impl<E: EglApi> Drop for Handles<E> {
    fn drop(&mut self) {
        if self.current {
            if let Err(e) = self.egl.make_current(self.display, None) {
                log::warn!("eglMakeCurrent(EGL_NO_CONTEXT) failed: {e}");
            }
        }

        if let Some(context) = self.context.take() {
            log::debug!("destroying EGL context {context:?}");
            if let Err(e) = self.egl.destroy_context(self.display, context) {
                log::warn!("eglDestroyContext failed: {e}");
            }
        }

        if let Some(surface) = self.surface.take() {
            log::debug!("destroying EGL surface {surface:?}");
            if let Err(e) = self.egl.destroy_surface(self.display, surface) {
                log::warn!("eglDestroySurface failed: {e}");
            }
        }

        log::debug!("terminating EGL display {:?}", self.display);
        if let Err(e) = self.egl.terminate(self.display) {
            log::warn!("eglTerminate failed: {e}");
        }
    }
}

/// Display connection, GPU context and drawing surface bound to the framebuffer.
///
/// The three are created together and released together:
/// destroy context, destroy surface, terminate display.
pub struct RenderContext<E: EglApi> {
    handles: Handles<E>,
    surface: E::Surface,
    version: (i32, i32),
}

impl<E: EglApi> RenderContext<E> {
    /// Acquires the display, picks a config, creates context + surface and
    /// makes them current on the calling thread.
    ///
    /// No step is retried. On failure every handle acquired so far is released.
    pub fn acquire(egl: E, init: &ContextInit) -> Result<Self, Error> {
        let display = egl.default_display().ok_or(Error::EglMissing {
            call: "eglGetDisplay",
            what: "EGL_NO_DISPLAY",
        })?;

        let mut handles = Handles {
            egl,
            display,
            context: None,
            surface: None,
            current: false,
        };

        let version = handles
            .egl
            .initialize(display)
            .map_err(|source| Error::Egl { call: "eglInitialize", source })?;
        log::info!("EGL {}.{} initialized", version.0, version.1);

        let config = handles
            .egl
            .choose_first_config(display, &init.config_attribs())
            .map_err(|source| Error::Egl { call: "eglChooseConfig", source })?
            .ok_or(Error::EglMissing {
                call: "eglChooseConfig",
                what: "no matching config",
            })?;
        log::debug!("EGL config {config:?} (buffer size {})", init.buffer_size);

        let context = handles
            .egl
            .create_context(display, config, &init.context_attribs())
            .map_err(|source| Error::Egl { call: "eglCreateContext", source })?;
        handles.context = Some(context);

        let surface = handles
            .egl
            .create_framebuffer_surface(display, config)
            .map_err(|source| Error::Egl { call: "eglCreateWindowSurface", source })?;
        handles.surface = Some(surface);

        handles
            .egl
            .make_current(display, Some((surface, context)))
            .map_err(|source| Error::Egl { call: "eglMakeCurrent", source })?;
        handles.current = true;

        Ok(Self {
            handles,
            surface,
            version,
        })
    }

    /// EGL version reported by `eglInitialize`.
    pub fn version(&self) -> (i32, i32) {
        self.version
    }

    /// Presents the back buffer. May block on vsync depending on the driver.
    pub fn swap_buffers(&self) -> Result<(), Error> {
        self.handles
            .egl
            .swap_buffers(self.handles.display, self.surface)
            .map_err(|source| Error::Egl { call: "eglSwapBuffers", source })
    }

    /// Looks up a client API entry point (used to load GL).
    pub fn proc_address(&self, name: &str) -> *const c_void {
        self.handles.egl.proc_address(name)
    }
}
