//! Recording stand-ins for the device, EGL and GL layers.
//!
//! Every call is appended to a shared [`Journal`] so tests can assert on call
//! order across layers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use khronos_egl as egl;

use crate::device::{EglApi, FramebufferDevice, ScreenGeometry};
use crate::render::{GlesApi, ShaderStage};

#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }

    /// Entries following the last occurrence of `entry` (empty if absent).
    pub fn entries_after(&self, entry: &str) -> Vec<String> {
        let entries = self.0.borrow();
        match entries.iter().rposition(|e| e == entry) {
            Some(i) => entries[i + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

// ── device ────────────────────────────────────────────────────────────────

pub(crate) struct MockDevice {
    journal: Journal,
    path: PathBuf,
    geometry: ScreenGeometry,
}

impl MockDevice {
    pub fn new(journal: Journal, geometry: ScreenGeometry) -> Self {
        Self {
            journal,
            path: PathBuf::from("/dev/fb-mock"),
            geometry,
        }
    }
}

impl FramebufferDevice for MockDevice {
    fn path(&self) -> &Path {
        &self.path
    }

    fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.journal.push("close");
    }
}

// ── egl ───────────────────────────────────────────────────────────────────

/// Fails the call named by `fail_at` (EGL function name). The special value
/// `"eglChooseConfig:empty"` makes config selection succeed with no match.
pub(crate) struct MockEgl {
    journal: Journal,
    pub fail_at: Option<&'static str>,
}

impl MockEgl {
    pub fn new(journal: Journal) -> Self {
        Self { journal, fail_at: None }
    }

    fn step(&self, entry: impl Into<String>, call: &'static str) -> Result<(), egl::Error> {
        self.journal.push(entry);
        if self.fail_at == Some(call) {
            Err(egl::Error::BadAlloc)
        } else {
            Ok(())
        }
    }
}

impl EglApi for MockEgl {
    type Display = u32;
    type Config = u32;
    type Context = u32;
    type Surface = u32;

    fn default_display(&self) -> Option<u32> {
        self.step("eglGetDisplay", "eglGetDisplay").ok().map(|()| 1)
    }

    fn initialize(&self, _display: u32) -> Result<(egl::Int, egl::Int), egl::Error> {
        self.step("eglInitialize", "eglInitialize")?;
        Ok((1, 4))
    }

    fn choose_first_config(&self, _display: u32, attribs: &[egl::Int]) -> Result<Option<u32>, egl::Error> {
        self.step(format!("eglChooseConfig({attribs:?})"), "eglChooseConfig")?;
        if self.fail_at == Some("eglChooseConfig:empty") {
            return Ok(None);
        }
        Ok(Some(1))
    }

    fn create_context(&self, _display: u32, _config: u32, attribs: &[egl::Int]) -> Result<u32, egl::Error> {
        self.step(format!("eglCreateContext({attribs:?})"), "eglCreateContext")?;
        Ok(1)
    }

    fn create_framebuffer_surface(&self, _display: u32, _config: u32) -> Result<u32, egl::Error> {
        self.step("eglCreateWindowSurface(null window)", "eglCreateWindowSurface")?;
        Ok(1)
    }

    fn make_current(&self, _display: u32, target: Option<(u32, u32)>) -> Result<(), egl::Error> {
        match target {
            Some(_) => self.step("eglMakeCurrent(bind)", "eglMakeCurrent"),
            None => {
                self.journal.push("eglMakeCurrent(unbind)");
                Ok(())
            }
        }
    }

    fn swap_buffers(&self, _display: u32, _surface: u32) -> Result<(), egl::Error> {
        self.step("eglSwapBuffers", "eglSwapBuffers")
    }

    fn destroy_context(&self, _display: u32, _context: u32) -> Result<(), egl::Error> {
        self.journal.push("eglDestroyContext");
        Ok(())
    }

    fn destroy_surface(&self, _display: u32, _surface: u32) -> Result<(), egl::Error> {
        self.journal.push("eglDestroySurface");
        Ok(())
    }

    fn terminate(&self, _display: u32) -> Result<(), egl::Error> {
        self.journal.push("eglTerminate");
        Ok(())
    }

    fn proc_address(&self, _name: &str) -> *const c_void {
        ptr::null()
    }
}

// ── gl ────────────────────────────────────────────────────────────────────

/// Handles are allocated sequentially from 1, so the quad pipeline gets
/// vertex shader 1, fragment shader 2, program 3, buffer 4.
///
/// A shader "compiles" when its source contains `void main`.
pub(crate) struct MockGl {
    journal: Journal,
    last_handle: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    uploads: Rc<RefCell<Vec<Vec<u8>>>>,
    draws: Cell<usize>,
    pub fail_link: bool,
    pub missing_attrib: Option<&'static str>,
    /// Clears the flag while recording the n-th draw call.
    pub interrupt_on_draw: Option<(Arc<AtomicBool>, usize)>,
}

impl MockGl {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            last_handle: Cell::new(0),
            sources: RefCell::new(HashMap::new()),
            uploads: Rc::default(),
            draws: Cell::new(0),
            fail_link: false,
            missing_attrib: None,
            interrupt_on_draw: None,
        }
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.borrow().clone()
    }

    /// Shared handle to the upload record, readable after the mock is consumed.
    pub fn upload_log(&self) -> Rc<RefCell<Vec<Vec<u8>>>> {
        self.uploads.clone()
    }

    fn alloc(&self) -> u32 {
        let handle = self.last_handle.get() + 1;
        self.last_handle.set(handle);
        handle
    }

    fn compiles(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .is_some_and(|src| src.contains("void main"))
    }
}

impl GlesApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;

    fn version(&self) -> String {
        "OpenGL ES 2.0 (mock)".to_string()
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let handle = self.alloc();
        self.journal.push(format!("glCreateShader({stage})"));
        Ok(handle)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.journal.push(format!("glCompileShader({shader})"));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.compiles(shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.compiles(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected IDENTIFIER\n".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.journal.push(format!("glDeleteShader({shader})"));
    }

    fn create_program(&self) -> Result<u32, String> {
        let handle = self.alloc();
        self.journal.push("glCreateProgram");
        Ok(handle)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.journal.push(format!("glAttachShader({program}, {shader})"));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.journal.push(format!("glDetachShader({program}, {shader})"));
    }

    fn link_program(&self, program: u32) {
        self.journal.push(format!("glLinkProgram({program})"));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        if self.fail_link {
            "error: vertex shader output `uv' not written, cannot link\n".to_string()
        } else {
            String::new()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        match program {
            Some(p) => self.journal.push(format!("glUseProgram({p})")),
            None => self.journal.push("glUseProgram(none)"),
        }
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        if self.missing_attrib == Some(name) {
            return None;
        }
        match name {
            "vp" => Some(0),
            "vu" => Some(1),
            _ => None,
        }
    }

    fn delete_program(&self, program: u32) {
        self.journal.push(format!("glDeleteProgram({program})"));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let handle = self.alloc();
        self.journal.push("glGenBuffers");
        Ok(handle)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        match buffer {
            Some(b) => self.journal.push(format!("glBindBuffer({b})")),
            None => self.journal.push("glBindBuffer(none)"),
        }
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        self.journal.push(format!("glBufferData({} bytes)", data.len()));
        self.uploads.borrow_mut().push(data.to_vec());
    }

    fn delete_buffer(&self, buffer: u32) {
        self.journal.push(format!("glDeleteBuffer({buffer})"));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.journal.push(format!("glEnableVertexAttribArray({index})"));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.journal.push(format!(
            "glVertexAttribPointer({index}, {size}, stride {stride}, offset {offset})"
        ));
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.journal.push(format!("glDrawArrays(TRIANGLE_STRIP, {first}, {count})"));

        let draws = self.draws.get() + 1;
        self.draws.set(draws);
        if let Some((flag, n)) = &self.interrupt_on_draw {
            if draws == *n {
                flag.store(false, Ordering::SeqCst);
            }
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.journal.push(format!("glViewport({x}, {y}, {width}, {height})"));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.journal.push(format!("glClearColor({r}, {g}, {b}, {a})"));
    }

    fn clear_color_buffer(&self) {
        self.journal.push("glClear(COLOR)");
    }
}
