use {
    super::{ShaderApi, ShaderStage, Uniform},
    crate::graphics::GraphicsError,
    gl::types::{GLchar, GLint, GLsizei},
    std::{
        ffi::CStr,
        marker::PhantomData,
        os::raw::c_void,
        ptr,
        rc::Rc,
    },
};

/// Proof that the OpenGL function pointers are loaded and that a context is
/// current on this thread.
///
/// Every device object holds an `Rc<GlContext>`. The type is neither Send nor
/// Sync because an OpenGL context is only current on the thread which made
/// it current.
pub struct GlContext {
    _not_send: PhantomData<*const ()>,
}

impl GlContext {
    /// Load the OpenGL function pointers.
    ///
    /// # Params
    ///
    /// * `loader` - resolves a GL function name to its address, typically
    ///   the windowing library's `get_proc_address`
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on the calling thread
    ///   - the context must outlive every object created from the returned
    ///     GlContext
    pub unsafe fn load_with<F>(loader: F) -> Result<Rc<Self>, GraphicsError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let required = [
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glLinkProgram", gl::LinkProgram::is_loaded()),
            ("glUseProgram", gl::UseProgram::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GraphicsError::FunctionsNotLoaded(missing));
        }

        let context = Self {
            _not_send: PhantomData,
        };
        log::info!(
            "OpenGL {} on {}",
            context.get_string(gl::VERSION),
            context.get_string(gl::RENDERER)
        );
        Ok(Rc::new(context))
    }

    /// Set the region of the framebuffer which draw calls render into.
    pub fn viewport(&self, width: i32, height: i32) {
        unsafe { gl::Viewport(0, 0, width, height) }
    }

    /// Clear the color buffer.
    pub fn clear(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Draw non-indexed triangles from the bound vertex array.
    pub fn draw_arrays(&self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) }
    }

    /// Draw indexed triangles from the bound vertex array's element buffer.
    pub fn draw_elements(&self, count: i32) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                count,
                gl::UNSIGNED_INT,
                ptr::null(),
            )
        }
    }

    fn get_string(&self, name: gl::types::GLenum) -> String {
        unsafe {
            let raw = gl::GetString(name);
            if raw.is_null() {
                return "<unknown>".to_owned();
            }
            CStr::from_ptr(raw as *const _).to_string_lossy().into_owned()
        }
    }
}

impl ShaderApi for GlContext {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()) }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buffer)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buffer)
        })
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn attribute_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetAttribLocation(program, name.as_ptr()) }
    }

    fn set_uniform(&self, location: i32, value: &Uniform) {
        unsafe {
            match value {
                Uniform::Int(v) => gl::Uniform1i(location, *v),
                Uniform::UInt(v) => gl::Uniform1ui(location, *v),
                Uniform::Float(v) => gl::Uniform1f(location, *v),
                Uniform::Vec2(v) => gl::Uniform2fv(location, 1, v.as_ptr()),
                Uniform::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
                Uniform::Vec4(v) => gl::Uniform4fv(location, 1, v.as_ptr()),
                Uniform::Mat3(m) => {
                    gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr())
                }
                Uniform::Mat4(m) => {
                    gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr())
                }
            }
        }
    }

    fn delete_program(&self, program: u32) {
        // Deleting handle 0 is silently ignored by the driver.
        unsafe { gl::DeleteProgram(program) }
    }
}

/// Read a driver info log of `len` bytes (including the NUL terminator).
fn read_info_log<F>(len: GLint, read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }
    let mut buffer: Vec<u8> = vec![0; len as usize];
    let mut written: GLsizei = 0;
    read(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}
