use bytemuck::{Pod, Zeroable};

use super::shader::{Program, QUAD_FRAGMENT_SHADER, QUAD_VERTEX_SHADER};
use super::GlesApi;
use crate::device::ScreenGeometry;
use crate::Error;

// ── vertex data ───────────────────────────────────────────────────────────

pub const QUAD_VERTEX_COUNT: i32 = 4;
pub const POSITION_COMPONENTS: i32 = 3;
pub const TEXCOORD_COMPONENTS: i32 = 2;

/// Non-interleaved quad: all positions, then all texcoords.
///
/// Vertex order is a triangle strip covering NDC `[-1, 1]²`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadData {
    pub positions: [[f32; 3]; 4],
    pub texcoords: [[f32; 2]; 4],
}

pub const QUAD_DATA: QuadData = QuadData {
    positions: [
        [-1.0, 1.0, 0.0],
        [-1.0, -1.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, -1.0, 0.0],
    ],
    texcoords: [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
};

/// Byte offset of the first texcoord, right after the 4 positions.
pub const TEXCOORD_OFFSET: i32 = (QUAD_VERTEX_COUNT * POSITION_COMPONENTS) * size_of::<f32>() as i32;

// ── vertex buffer ─────────────────────────────────────────────────────────

/// Static vertex buffer holding [`QUAD_DATA`]; deleted on drop.
pub struct QuadBuffer<'gl, G: GlesApi> {
    gl: &'gl G,
    raw: G::Buffer,
}

impl<'gl, G: GlesApi> QuadBuffer<'gl, G> {
    /// Creates the buffer and uploads the quad once. The contents never change.
    pub fn upload(gl: &'gl G) -> Result<Self, Error> {
        let raw = gl
            .create_buffer()
            .map_err(|reason| Error::GlCreate { object: "vertex buffer", reason })?;

        gl.bind_array_buffer(Some(raw));
        gl.array_buffer_data_static(bytemuck::bytes_of(&QUAD_DATA));
        gl.bind_array_buffer(None);

        log::debug!("quad uploaded ({} bytes)", size_of::<QuadData>());
        Ok(Self { gl, raw })
    }

    pub fn raw(&self) -> G::Buffer {
        self.raw
    }
}

impl<G: GlesApi> Drop for QuadBuffer<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.raw);
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Attribute locations resolved from the linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct QuadAttribs {
    pub position: u32,
    pub texcoord: u32,
}

/// Fullscreen flat-red quad renderer.
///
/// Owns the program and vertex buffer. Drawing issues the whole per-frame
/// command sequence except presentation.
pub struct QuadRenderer<'gl, G: GlesApi> {
    gl: &'gl G,
    // Dropped in field order: buffer first, then program.
    buffer: QuadBuffer<'gl, G>,
    program: Program<'gl, G>,
    attribs: QuadAttribs,
}

impl<'gl, G: GlesApi> QuadRenderer<'gl, G> {
    /// Builds the program, resolves `vp`/`vu`, sets viewport and clear color,
    /// and uploads the quad.
    pub fn new(gl: &'gl G, geometry: ScreenGeometry) -> Result<Self, Error> {
        let program = Program::build(gl, QUAD_VERTEX_SHADER, QUAD_FRAGMENT_SHADER)?;
        program.bind();

        let attribs = QuadAttribs {
            position: program.attrib_location("vp")?,
            texcoord: program.attrib_location("vu")?,
        };
        log::debug!("attributes: vp={} vu={}", attribs.position, attribs.texcoord);

        let (x, y, w, h) = geometry.viewport();
        gl.viewport(x, y, w, h);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);

        let buffer = QuadBuffer::upload(gl)?;

        Ok(Self {
            gl,
            buffer,
            program,
            attribs,
        })
    }

    /// Records one frame: clear, bind, describe attributes, draw, unbind.
    pub fn draw(&self) {
        let gl = self.gl;
        let QuadAttribs { position, texcoord } = self.attribs;

        gl.clear_color_buffer();

        self.program.bind();
        gl.bind_array_buffer(Some(self.buffer.raw()));

        gl.enable_vertex_attrib_array(position);
        gl.enable_vertex_attrib_array(texcoord);
        gl.vertex_attrib_pointer_f32(position, POSITION_COMPONENTS, 0, 0);
        gl.vertex_attrib_pointer_f32(texcoord, TEXCOORD_COMPONENTS, 0, TEXCOORD_OFFSET);

        gl.draw_triangle_strip(0, QUAD_VERTEX_COUNT);

        gl.bind_array_buffer(None);
    }
}
