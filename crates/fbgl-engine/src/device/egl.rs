use std::ffi::c_void;
use std::fmt;
use std::ptr;

use khronos_egl as egl;

use crate::Error;

/// The EGL entry points used to bind a context to the framebuffer.
///
/// Handles are plain `Copy` values; ownership and release order are enforced
/// by [`RenderContext`](super::RenderContext), not by the implementor.
pub trait EglApi {
    type Display: Copy + fmt::Debug;
    type Config: Copy + fmt::Debug;
    type Context: Copy + fmt::Debug;
    type Surface: Copy + fmt::Debug;

    /// `eglGetDisplay(EGL_DEFAULT_DISPLAY)`; `None` means `EGL_NO_DISPLAY`.
    fn default_display(&self) -> Option<Self::Display>;

    fn initialize(&self, display: Self::Display) -> Result<(egl::Int, egl::Int), egl::Error>;

    fn choose_first_config(
        &self,
        display: Self::Display,
        attribs: &[egl::Int],
    ) -> Result<Option<Self::Config>, egl::Error>;

    fn create_context(
        &self,
        display: Self::Display,
        config: Self::Config,
        attribs: &[egl::Int],
    ) -> Result<Self::Context, egl::Error>;

    /// Creates a window surface on a null native window, i.e. the framebuffer itself.
    fn create_framebuffer_surface(
        &self,
        display: Self::Display,
        config: Self::Config,
    ) -> Result<Self::Surface, egl::Error>;

    /// Binds `target` as draw/read surface and context; `None` unbinds.
    fn make_current(
        &self,
        display: Self::Display,
        target: Option<(Self::Surface, Self::Context)>,
    ) -> Result<(), egl::Error>;

    fn swap_buffers(&self, display: Self::Display, surface: Self::Surface) -> Result<(), egl::Error>;

    fn destroy_context(&self, display: Self::Display, context: Self::Context) -> Result<(), egl::Error>;

    fn destroy_surface(&self, display: Self::Display, surface: Self::Surface) -> Result<(), egl::Error>;

    fn terminate(&self, display: Self::Display) -> Result<(), egl::Error>;

    /// Client API entry point lookup; null when unknown.
    fn proc_address(&self, name: &str) -> *const c_void;
}

/// `libEGL` loaded at runtime.
pub struct EglLib {
    egl: egl::DynamicInstance<egl::EGL1_4>,
}

impl EglLib {
    pub fn load() -> Result<Self, Error> {
        // SAFETY: loading libEGL runs its initializers; nothing else touches EGL yet.
        let egl = unsafe { egl::DynamicInstance::<egl::EGL1_4>::load_required() }
            .map_err(|e| Error::EglLoad(e.to_string()))?;
        log::debug!("libEGL loaded");
        Ok(Self { egl })
    }
}

impl fmt::Debug for EglLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EglLib").finish_non_exhaustive()
    }
}

impl EglApi for EglLib {
    type Display = egl::Display;
    type Config = egl::Config;
    type Context = egl::Context;
    type Surface = egl::Surface;

    fn default_display(&self) -> Option<egl::Display> {
        // SAFETY: EGL_DEFAULT_DISPLAY is always a valid native display id.
        unsafe { self.egl.get_display(egl::DEFAULT_DISPLAY) }
    }

    fn initialize(&self, display: egl::Display) -> Result<(egl::Int, egl::Int), egl::Error> {
        self.egl.initialize(display)
    }

    fn choose_first_config(
        &self,
        display: egl::Display,
        attribs: &[egl::Int],
    ) -> Result<Option<egl::Config>, egl::Error> {
        self.egl.choose_first_config(display, attribs)
    }

    fn create_context(
        &self,
        display: egl::Display,
        config: egl::Config,
        attribs: &[egl::Int],
    ) -> Result<egl::Context, egl::Error> {
        self.egl.create_context(display, config, None, attribs)
    }

    fn create_framebuffer_surface(
        &self,
        display: egl::Display,
        config: egl::Config,
    ) -> Result<egl::Surface, egl::Error> {
        // SAFETY: fbdev drivers accept a null native window and render straight to the device.
        unsafe { self.egl.create_window_surface(display, config, ptr::null_mut(), None) }
    }

    fn make_current(
        &self,
        display: egl::Display,
        target: Option<(egl::Surface, egl::Context)>,
    ) -> Result<(), egl::Error> {
        let surface = target.map(|(s, _)| s);
        let context = target.map(|(_, c)| c);
        self.egl.make_current(display, surface, surface, context)
    }

    fn swap_buffers(&self, display: egl::Display, surface: egl::Surface) -> Result<(), egl::Error> {
        self.egl.swap_buffers(display, surface)
    }

    fn destroy_context(&self, display: egl::Display, context: egl::Context) -> Result<(), egl::Error> {
        self.egl.destroy_context(display, context)
    }

    fn destroy_surface(&self, display: egl::Display, surface: egl::Surface) -> Result<(), egl::Error> {
        self.egl.destroy_surface(display, surface)
    }

    fn terminate(&self, display: egl::Display) -> Result<(), egl::Error> {
        self.egl.terminate(display)
    }

    fn proc_address(&self, name: &str) -> *const c_void {
        self.egl
            .get_proc_address(name)
            .map_or(ptr::null(), |f| f as *const c_void)
    }
}
