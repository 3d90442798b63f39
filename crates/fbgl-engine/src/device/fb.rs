//! Framebuffer device access.
//!
//! Only the variable screen info is read; the renderer never maps the pixel
//! memory itself, EGL owns presentation.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use crate::Error;

/// `FBIOGET_VSCREENINFO` from `<linux/fb.h>`.
const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;

#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct FbBitField {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// Mirror of `struct fb_var_screeninfo`. Most fields are only read by the kernel.
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitField,
    green: FbBitField,
    blue: FbBitField,
    transp: FbBitField,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// Visible display resolution in pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport rectangle `(x, y, w, h)` covering the whole screen.
    ///
    /// No aspect correction is applied. Dimensions beyond `i32::MAX` (never
    /// reported by a real framebuffer) saturate instead of wrapping negative.
    #[inline]
    pub fn viewport(self) -> (i32, i32, i32, i32) {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        (0, 0, clamp(self.width), clamp(self.height))
    }
}

/// A display device the renderer can be sized against.
///
/// The device stays open for as long as the value lives; dropping it closes
/// the underlying handle.
pub trait FramebufferDevice {
    fn path(&self) -> &Path;

    fn geometry(&self) -> ScreenGeometry;
}

/// An open Linux framebuffer character device (e.g. `/dev/fb0`).
#[derive(Debug)]
pub struct Framebuffer {
    file: File,
    path: PathBuf,
    geometry: ScreenGeometry,
}

impl Framebuffer {
    /// Opens the device read/write and queries its geometry.
    ///
    /// Both failures map to the device-unavailable class.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| Error::DeviceOpen { path: path.clone(), source })?;

        let mut var_info = FbVarScreenInfo::default();
        // SAFETY: `var_info` is a correctly sized `fb_var_screeninfo` and the fd is open.
        let ret = unsafe { libc::ioctl(file.as_raw_fd(), FBIOGET_VSCREENINFO, &mut var_info) };
        if ret < 0 {
            return Err(Error::GeometryQuery {
                path,
                source: io::Error::last_os_error(),
            });
        }

        let geometry = ScreenGeometry::new(var_info.xres, var_info.yres);
        log::info!(
            "framebuffer {}: {}x{} ({}x{} virtual), {} bpp",
            path.display(),
            var_info.xres,
            var_info.yres,
            var_info.xres_virtual,
            var_info.yres_virtual,
            var_info.bits_per_pixel,
        );

        Ok(Self { file, path, geometry })
    }
}

impl FramebufferDevice for Framebuffer {
    fn path(&self) -> &Path {
        &self.path
    }

    fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        log::debug!("closing {} (fd {})", self.path.display(), self.file.as_raw_fd());
    }
}
