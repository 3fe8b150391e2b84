use {
    crate::graphics::gl_api::{LayoutError, ShaderError},
    std::path::PathBuf,
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error(transparent)]
    ShaderError(#[from] ShaderError),

    #[error(transparent)]
    LayoutError(#[from] LayoutError),

    #[error("The following OpenGL functions could not be loaded {:?}", .0)]
    FunctionsNotLoaded(Vec<String>),

    #[error("Unable to load the texture at {:?}", .path)]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("A {}x{} texture is too large for the device", .0, .1)]
    TextureTooLarge(u32, u32),
}
