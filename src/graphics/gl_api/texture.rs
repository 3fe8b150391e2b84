use {
    super::GlContext,
    crate::graphics::GraphicsError,
    gl::types::GLint,
    image::DynamicImage,
    std::{path::Path, rc::Rc},
};

/// An owned 2D RGBA texture with a full mipmap chain.
pub struct Texture2D {
    raw: u32,
    width: u32,
    height: u32,
    _ctx: Rc<GlContext>,
}

impl Texture2D {
    /// Load a texture from an image file.
    pub fn from_file(
        ctx: Rc<GlContext>,
        path: impl AsRef<Path>,
    ) -> Result<Self, GraphicsError> {
        let path = path.as_ref();
        let image =
            image::open(path).map_err(|source| GraphicsError::TextureLoad {
                path: path.to_owned(),
                source,
            })?;
        Self::from_image(ctx, &image)
    }

    /// Upload an image as a new texture.
    ///
    /// The texture repeats in both directions, uses trilinear filtering when
    /// minified and linear filtering when magnified.
    pub fn from_image(
        ctx: Rc<GlContext>,
        image: &DynamicImage,
    ) -> Result<Self, GraphicsError> {
        // OpenGL's first row is the bottom of the image.
        let rgba = image.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();
        let (gl_width, gl_height) =
            match (GLint::try_from(width), GLint::try_from(height)) {
                (Ok(w), Ok(h)) => (w, h),
                _ => return Err(GraphicsError::TextureTooLarge(width, height)),
            };

        let mut raw = 0;
        unsafe {
            gl::GenTextures(1, &mut raw);
            gl::BindTexture(gl::TEXTURE_2D, raw);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_WRAP_S,
                gl::REPEAT as GLint,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_WRAP_T,
                gl::REPEAT as GLint,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                gl::LINEAR_MIPMAP_LINEAR as GLint,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                gl::LINEAR as GLint,
            );
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as GLint,
                gl_width,
                gl_height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                rgba.as_raw().as_ptr() as *const _,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }
        log::debug!("Created {}x{} texture {}", width, height, raw);

        Ok(Self {
            raw,
            width,
            height,
            _ctx: ctx,
        })
    }

    /// Bind the texture to the given texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.raw);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.raw) }
    }
}
