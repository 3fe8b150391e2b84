use {super::Uniform, std::ffi::CStr};

/// The pipeline stage a single shader object targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The OpenGL enum used when creating a shader object for this stage.
    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// The subset of the graphics device which shader programs are built from.
///
/// Handles are the raw integer names handed out by the device. Zero is never
/// a valid handle. Every call is synchronous and assumes the device context is
/// current on the calling thread.
///
/// `GlContext` is the real implementation. Tests substitute their own.
pub trait ShaderApi {
    /// Create an empty shader object for the given stage.
    fn create_shader(&self, stage: ShaderStage) -> u32;

    /// Replace the source text of a shader object.
    fn shader_source(&self, shader: u32, source: &CStr);

    /// Compile the shader's current source.
    fn compile_shader(&self, shader: u32);

    /// True when the last compile of the shader succeeded.
    fn shader_compile_status(&self, shader: u32) -> bool;

    /// The compiler's log for the last compile. May be empty.
    fn shader_info_log(&self, shader: u32) -> String;

    /// Flag a shader object for deletion.
    fn delete_shader(&self, shader: u32);

    /// Create an empty program object.
    fn create_program(&self) -> u32;

    fn attach_shader(&self, program: u32, shader: u32);

    fn link_program(&self, program: u32);

    /// True when the last link of the program succeeded.
    fn program_link_status(&self, program: u32) -> bool;

    /// The linker's log for the last link. May be empty.
    fn program_info_log(&self, program: u32) -> String;

    /// Make the program current for all subsequent draw calls. Zero unbinds.
    fn use_program(&self, program: u32);

    /// The location of a uniform, or -1 if the program has no active uniform
    /// by that name.
    fn uniform_location(&self, program: u32, name: &CStr) -> i32;

    /// The location of a vertex attribute, or -1 if the program has no active
    /// attribute by that name.
    fn attribute_location(&self, program: u32, name: &CStr) -> i32;

    /// Upload a value to a uniform location of the current program.
    fn set_uniform(&self, location: i32, value: &Uniform);

    fn delete_program(&self, program: u32);
}
