mod error;

pub mod gl_api;

pub use self::error::GraphicsError;
