use {
    super::{ShaderError, ShaderStage},
    std::path::Path,
};

/// The source text for both stages of a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Build a shader source from in-memory text.
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from files.
    ///
    /// # Params
    ///
    /// * `vertex_path` - the file containing the vertex stage's GLSL
    /// * `fragment_path` - the file containing the fragment stage's GLSL
    ///
    /// # Returns
    ///
    /// `ShaderError::SourceUnavailable` naming the stage and path of the first
    /// file which could not be read.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_stage(ShaderStage::Vertex, vertex_path.as_ref())?,
            fragment: read_stage(
                ShaderStage::Fragment,
                fragment_path.as_ref(),
            )?,
        })
    }

    /// The source text for one stage.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| {
        ShaderError::SourceUnavailable {
            stage,
            path: path.to_owned(),
            source,
        }
    })
}
