use {
    super::GlContext,
    gl::types::{GLenum, GLsizeiptr},
    std::{marker::PhantomData, rc::Rc},
};

/// Which binding point a buffer is created for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex data (a VBO).
    Vertices,

    /// Triangle indices (an EBO).
    Indices,
}

impl BufferTarget {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Vertices => gl::ARRAY_BUFFER,
            BufferTarget::Indices => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// An owned GPU buffer filled once with static data.
pub struct Buffer<T: Copy> {
    raw: u32,
    target: BufferTarget,
    len: usize,
    _ctx: Rc<GlContext>,
    _phantom: PhantomData<T>,
}

impl<T: Copy> Buffer<T> {
    /// Create a buffer and upload `data` to it.
    ///
    /// Data is uploaded through the copy-write binding point so creating an
    /// index buffer doesn't touch the currently bound vertex array.
    pub fn new(ctx: Rc<GlContext>, target: BufferTarget, data: &[T]) -> Self {
        let mut raw = 0;
        unsafe {
            gl::GenBuffers(1, &mut raw);
            gl::BindBuffer(gl::COPY_WRITE_BUFFER, raw);
            gl::BufferData(
                gl::COPY_WRITE_BUFFER,
                std::mem::size_of_val(data) as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
            gl::BindBuffer(gl::COPY_WRITE_BUFFER, 0);
        }
        Self {
            raw,
            target,
            len: data.len(),
            _ctx: ctx,
            _phantom: PhantomData,
        }
    }

    /// Bind the buffer to its target. Binding an index buffer records it in
    /// the currently bound vertex array.
    pub fn bind(&self) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), self.raw) }
    }

    /// The number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Any buffer a vertex array reads from, regardless of its element type.
pub(crate) trait RetainedBuffer {}

impl<T: Copy> RetainedBuffer for Buffer<T> {}

impl<T: Copy> Drop for Buffer<T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.raw) }
    }
}
