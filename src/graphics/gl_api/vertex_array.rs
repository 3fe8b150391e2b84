use {
    super::{
        buffer::RetainedBuffer, Buffer, GlContext, LayoutError, VertexLayout,
    },
    gl::types::{GLint, GLsizei},
    std::rc::Rc,
};

/// An owned vertex array object which records how vertex data is read from
/// its buffers.
///
/// The vertex array shares ownership of the buffers it reads from, so they
/// live at least as long as it does.
pub struct VertexArray {
    raw: u32,
    ctx: Rc<GlContext>,
    _buffers: Vec<Rc<dyn RetainedBuffer>>,
}

impl VertexArray {
    /// Create a vertex array reading interleaved vertices from
    /// `vertex_buffer` according to `layout`.
    ///
    /// # Params
    ///
    /// * `ctx` - the current OpenGL context
    /// * `vertex_buffer` - the buffer holding the vertices
    /// * `index_buffer` - an optional element buffer for indexed drawing
    /// * `layout` - the stride and attribute offsets of one vertex
    ///
    /// # Returns
    ///
    /// A `LayoutError` if the layout is inconsistent. No device objects are
    /// created in that case.
    pub fn new<V: Copy + 'static>(
        ctx: Rc<GlContext>,
        vertex_buffer: Rc<Buffer<V>>,
        index_buffer: Option<Rc<Buffer<u32>>>,
        layout: &VertexLayout,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;

        let mut raw = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut raw);
            gl::BindVertexArray(raw);
        }

        vertex_buffer.bind();
        let mut buffers: Vec<Rc<dyn RetainedBuffer>> = Vec::with_capacity(2);
        buffers.push(vertex_buffer);
        if let Some(indices) = index_buffer {
            indices.bind();
            buffers.push(indices);
        }

        for attribute in layout.attributes() {
            unsafe {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components as GLint,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride() as GLsizei,
                    attribute.offset as *const _,
                );
                gl::EnableVertexAttribArray(attribute.location);
            }
        }

        unsafe { gl::BindVertexArray(0) };
        Ok(Self {
            raw,
            ctx,
            _buffers: buffers,
        })
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.raw) }
    }

    /// Bind the vertex array and draw `count` vertices as triangles.
    pub fn draw_arrays(&self, count: i32) {
        self.bind();
        self.ctx.draw_arrays(0, count);
    }

    /// Bind the vertex array and draw `count` indices as triangles.
    pub fn draw_elements(&self, count: i32) {
        self.bind();
        self.ctx.draw_elements(count);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.raw) }
    }
}
