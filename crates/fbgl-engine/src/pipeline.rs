use std::sync::atomic::AtomicBool;

use crate::core::run_until_interrupted;
use crate::device::{
    export_platform_env, ContextInit, EglApi, EglLib, Framebuffer, FramebufferDevice,
    RenderContext, ScreenGeometry, Session,
};
use crate::render::{GlesApi, GlowGles, QuadRenderer};
use crate::Error;

/// Outcome of a completed run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    pub geometry: ScreenGeometry,
    pub egl_version: (i32, i32),
    /// Frames presented before the loop observed the interrupt.
    pub frames: u64,
}

/// Opens the framebuffer, binds EGL + GLES2 to it and draws the quad until
/// `keep_running` is cleared.
pub fn run(init: &ContextInit, keep_running: &AtomicBool) -> Result<RunSummary, Error> {
    let device = Framebuffer::open(&init.device_path)?;

    if init.export_platform_env {
        export_platform_env(&init.device_path);
    }
    let egl = EglLib::load()?;

    run_with(device, egl, init, keep_running, |ctx| {
        // SAFETY: the session made the context current on this thread, and the
        // GL handle is dropped before the session tears the context down.
        unsafe { GlowGles::from_loader(|name| ctx.proc_address(name)) }
    })
}

/// Drives the pipeline on caller-supplied device, EGL and GL implementations.
///
/// Teardown happens in reverse acquisition order whether the run ends by
/// interrupt or by error: GL objects, then context, surface, display, and the
/// device last.
pub fn run_with<D, E, G, L>(
    device: D,
    egl: E,
    init: &ContextInit,
    keep_running: &AtomicBool,
    load_gl: L,
) -> Result<RunSummary, Error>
where
    D: FramebufferDevice,
    E: EglApi,
    G: GlesApi,
    L: FnOnce(&RenderContext<E>) -> G,
{
    let geometry = device.geometry();
    let session = Session::open(device, egl, init)?;
    let egl_version = session.context().version();

    let gl = load_gl(session.context());
    log::info!("GL_VERSION: {}", gl.version());

    let quad = QuadRenderer::new(&gl, geometry)?;
    log::info!(
        "rendering fullscreen quad at {}x{}; send SIGINT to stop",
        geometry.width,
        geometry.height
    );

    let frames = run_until_interrupted(keep_running, || {
        quad.draw();
        session.context().swap_buffers()
    })?;

    Ok(RunSummary {
        geometry,
        egl_version,
        frames,
    })
}
