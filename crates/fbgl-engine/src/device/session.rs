use super::{ContextInit, EglApi, FramebufferDevice, RenderContext, ScreenGeometry};
use crate::Error;

/// A framebuffer device together with the rendering context bound to it.
///
/// Field order is release order: the context is torn down before the device
/// is closed.
pub struct Session<D: FramebufferDevice, E: EglApi> {
    context: RenderContext<E>,
    device: D,
}

impl<D: FramebufferDevice, E: EglApi> Session<D, E> {
    /// Binds a rendering context to an already opened device.
    ///
    /// On failure the partially acquired context is released first, then the
    /// device is closed.
    pub fn open(device: D, egl: E, init: &ContextInit) -> Result<Self, Error> {
        let context = RenderContext::acquire(egl, init)?;
        log::debug!("rendering context bound to {}", device.path().display());
        Ok(Self { context, device })
    }

    pub fn geometry(&self) -> ScreenGeometry {
        self.device.geometry()
    }

    pub fn context(&self) -> &RenderContext<E> {
        &self.context
    }
}
