use {super::ShaderStage, std::path::PathBuf, thiserror::Error};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Unable to read the {stage} shader source at {:?}", .path)]
    SourceUnavailable {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The {stage} shader source contains an interior NUL byte")]
    InvalidSource {
        stage: ShaderStage,
        #[source]
        source: std::ffi::NulError,
    },

    #[error("Unable to compile the {stage} shader:\n{diagnostic}")]
    Compile {
        stage: ShaderStage,
        diagnostic: String,
    },

    #[error("Unable to link the shader program:\n{diagnostic}")]
    Link { diagnostic: String },
}

impl ShaderError {
    /// The compiler or linker log attached to this error, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { diagnostic, .. }
            | ShaderError::Link { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("A vertex layout needs at least one attribute")]
    EmptyLayout,

    #[error("A vertex layout's stride must be greater than zero")]
    ZeroStride,

    #[error(
        "Attribute '{name}' has {components} components, expected 1 to 4"
    )]
    InvalidComponentCount { name: String, components: usize },

    #[error(
        "Attribute '{name}' spans bytes {offset}..{end} which exceeds the \
         stride of {stride} bytes"
    )]
    AttributeOutOfBounds {
        name: String,
        offset: usize,
        end: usize,
        stride: usize,
    },

    #[error("Location {location} is used by both '{first}' and '{second}'")]
    DuplicateLocation {
        location: u32,
        first: String,
        second: String,
    },

    #[error("Attributes '{first}' and '{second}' overlap in the vertex")]
    OverlappingAttributes { first: String, second: String },

    #[error(
        "Attribute '{name}' is at location {layout} in the vertex layout but \
         the shader program declares it at location {program}"
    )]
    LocationMismatch {
        name: String,
        layout: u32,
        program: u32,
    },
}
