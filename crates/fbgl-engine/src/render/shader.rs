//! Shader compilation and program linking.

use std::fmt;

use super::GlesApi;
use crate::Error;

/// Capacity of a diagnostic log buffer, terminator included.
pub const INFO_LOG_CAPACITY: usize = 16 * 1024;

/// Passes the position through and forwards the texcoord as a varying.
pub const QUAD_VERTEX_SHADER: &str = "\
attribute mediump vec3 vp;
attribute mediump vec2 vu;
varying mediump vec2 uv;
void main() {
    uv = vu;
    gl_Position = vec4(vp, 1.0);
}
";

/// Ignores the varying and writes opaque red.
pub const QUAD_FRAGMENT_SHADER: &str = "\
varying mediump vec2 uv;
void main() {
    gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Compiler or linker diagnostic, bounded to [`INFO_LOG_CAPACITY`].
///
/// Holds at most `INFO_LOG_CAPACITY - 1` bytes of text. Longer logs are cut at
/// the boundary (backing off to a char boundary) and flagged as truncated, so
/// callers must not assume the full diagnostic is present.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InfoLog {
    text: String,
    truncated: bool,
}

impl InfoLog {
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim_end_matches('\0');
        let limit = INFO_LOG_CAPACITY - 1;
        if raw.len() <= limit {
            return Self {
                text: raw.to_owned(),
                truncated: false,
            };
        }

        let mut end = limit;
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            text: raw[..end].to_owned(),
            truncated: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for InfoLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if self.truncated {
            f.write_str("\n[log truncated]")?;
        }
        Ok(())
    }
}

/// A compiled shader object; deleted on drop.
pub struct Shader<'gl, G: GlesApi> {
    gl: &'gl G,
    raw: G::Shader,
}

impl<'gl, G: GlesApi> Shader<'gl, G> {
    /// Compiles `source` for `stage`.
    ///
    /// On failure the compiler log is captured and the shader object deleted.
    pub fn compile(gl: &'gl G, stage: ShaderStage, source: &str) -> Result<Self, Error> {
        let raw = gl
            .create_shader(stage)
            .map_err(|reason| Error::GlCreate { object: "shader", reason })?;
        let shader = Self { gl, raw };

        gl.shader_source(raw, source);
        gl.compile_shader(raw);

        if !gl.shader_compile_status(raw) {
            let log = InfoLog::from_raw(&gl.shader_info_log(raw));
            return Err(Error::ShaderCompile { stage, log });
        }

        log::debug!("{stage} shader compiled");
        Ok(shader)
    }

    pub fn raw(&self) -> G::Shader {
        self.raw
    }
}

impl<G: GlesApi> Drop for Shader<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.raw);
    }
}

/// A linked program; deleted on drop.
pub struct Program<'gl, G: GlesApi> {
    gl: &'gl G,
    raw: G::Program,
}

impl<'gl, G: GlesApi> Program<'gl, G> {
    /// Compiles both stages and links them.
    ///
    /// Link status is checked; a failed link reports the program log.
    pub fn build(gl: &'gl G, vertex_src: &str, fragment_src: &str) -> Result<Self, Error> {
        let vertex = Shader::compile(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = Shader::compile(gl, ShaderStage::Fragment, fragment_src)?;
        Self::link(gl, &vertex, &fragment)
    }

    pub fn link(gl: &'gl G, vertex: &Shader<'gl, G>, fragment: &Shader<'gl, G>) -> Result<Self, Error> {
        let raw = gl
            .create_program()
            .map_err(|reason| Error::GlCreate { object: "program", reason })?;
        let program = Self { gl, raw };

        gl.attach_shader(raw, vertex.raw());
        gl.attach_shader(raw, fragment.raw());
        gl.link_program(raw);

        // The program keeps its executable; shader objects are no longer needed.
        gl.detach_shader(raw, vertex.raw());
        gl.detach_shader(raw, fragment.raw());

        if !gl.program_link_status(raw) {
            let log = InfoLog::from_raw(&gl.program_info_log(raw));
            return Err(Error::ProgramLink { log });
        }

        log::debug!("shader program linked");
        Ok(program)
    }

    pub fn bind(&self) {
        self.gl.use_program(Some(self.raw));
    }

    /// Looks up a vertex attribute; absent or optimized-out names are an error.
    pub fn attrib_location(&self, name: &'static str) -> Result<u32, Error> {
        self.gl
            .attrib_location(self.raw, name)
            .ok_or(Error::MissingAttribute { name })
    }

    pub fn raw(&self) -> G::Program {
        self.raw
    }
}

impl<G: GlesApi> Drop for Program<'_, G> {
    fn drop(&mut self) {
        self.gl.use_program(None);
        self.gl.delete_program(self.raw);
    }
}
