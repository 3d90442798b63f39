//! OpenGL ES 2 rendering.
//!
//! Everything here issues GL calls through [`GlesApi`], which needs a context
//! made current by the device layer.
//!
//! Convention:
//! - Geometry is specified directly in NDC; no projection is applied.
//! - GL objects are owned by RAII wrappers and deleted on drop.

mod gl;
mod quad;
mod shader;

pub use gl::{GlesApi, GlowGles};
pub use quad::{
    QuadAttribs, QuadBuffer, QuadData, QuadRenderer, QUAD_DATA, QUAD_VERTEX_COUNT, TEXCOORD_OFFSET,
};
pub use shader::{
    InfoLog, Program, Shader, ShaderStage, INFO_LOG_CAPACITY, QUAD_FRAGMENT_SHADER,
    QUAD_VERTEX_SHADER,
};
