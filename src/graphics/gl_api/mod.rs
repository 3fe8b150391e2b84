//! Owned OpenGL objects.
//!
//! Everything here assumes an OpenGL 3.3 core context is current on the
//! calling thread. Holding an `Rc<GlContext>` is the proof of that.

mod buffer;
mod context;
pub mod diagnostic;
mod error;
mod shader_api;
mod shader_program;
mod shader_source;
mod texture;
mod uniform;
mod vertex_array;
mod vertex_layout;

pub use self::{
    buffer::{Buffer, BufferTarget},
    context::GlContext,
    error::{LayoutError, ShaderError},
    shader_api::{ShaderApi, ShaderStage},
    shader_program::ShaderProgram,
    shader_source::ShaderSource,
    texture::Texture2D,
    uniform::Uniform,
    vertex_array::VertexArray,
    vertex_layout::{Vertex, VertexAttribute, VertexLayout},
};
