use {
    super::{LayoutError, ShaderApi, ShaderProgram},
    std::mem::size_of,
};

/// A single float vector attribute inside an interleaved vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The attribute's name in the vertex shader.
    pub name: String,

    /// The `layout(location = N)` the vertex shader reads this attribute from.
    pub location: u32,

    /// The number of f32 components, 1 through 4.
    pub components: usize,

    /// The byte offset of the attribute from the start of the vertex.
    pub offset: usize,
}

impl VertexAttribute {
    /// One past the last byte of this attribute within the vertex, or `None`
    /// if that isn't representable.
    pub fn end(&self) -> Option<usize> {
        self.components
            .checked_mul(size_of::<f32>())
            .and_then(|size| self.offset.checked_add(size))
    }
}

/// The byte layout of one interleaved vertex.
///
/// The stride and offsets must agree exactly with the attributes the active
/// shader program declares. A disagreement isn't reported by the device, it
/// just renders garbage, so layouts are validated before they are applied
/// and can be checked against a linked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    attributes: Vec<VertexAttribute>,
}

/// Vertex types describe their own layout, typically with
/// `memoffset::offset_of!`.
pub trait Vertex: Copy {
    fn layout() -> VertexLayout;
}

impl VertexLayout {
    /// Start a layout for vertices which are `stride` bytes apart.
    pub fn new(stride: usize) -> Self {
        Self {
            stride,
            attributes: vec![],
        }
    }

    /// Add an attribute to the layout.
    ///
    /// # Params
    ///
    /// * `name` - the attribute's name in the vertex shader
    /// * `location` - the attribute's location in the vertex shader
    /// * `components` - how many f32 values the attribute holds
    /// * `offset` - the attribute's byte offset within a vertex
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        location: u32,
        components: usize,
        offset: usize,
    ) -> Self {
        self.attributes.push(VertexAttribute {
            name: name.into(),
            location,
            components,
            offset,
        });
        self
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Check that the layout is internally consistent.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.stride == 0 {
            return Err(LayoutError::ZeroStride);
        }
        if self.attributes.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }

        for attribute in &self.attributes {
            if !(1..=4).contains(&attribute.components) {
                return Err(LayoutError::InvalidComponentCount {
                    name: attribute.name.clone(),
                    components: attribute.components,
                });
            }
            let end = attribute.end().unwrap_or(usize::MAX);
            if end > self.stride {
                return Err(LayoutError::AttributeOutOfBounds {
                    name: attribute.name.clone(),
                    offset: attribute.offset,
                    end,
                    stride: self.stride,
                });
            }
        }

        for (i, first) in self.attributes.iter().enumerate() {
            for second in &self.attributes[i + 1..] {
                if first.location == second.location {
                    return Err(LayoutError::DuplicateLocation {
                        location: first.location,
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
                // every end fits within the stride once bounds are checked
                let first_end = first.end().unwrap_or(usize::MAX);
                let second_end = second.end().unwrap_or(usize::MAX);
                if first.offset < second_end && second.offset < first_end {
                    return Err(LayoutError::OverlappingAttributes {
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Check the layout's locations against a linked program.
    ///
    /// Attributes the program doesn't report are skipped with a warning
    /// because drivers remove inputs the shader never reads.
    pub fn check_program<A: ShaderApi>(
        &self,
        program: &ShaderProgram<A>,
    ) -> Result<(), LayoutError> {
        for attribute in &self.attributes {
            match program.attribute_location(&attribute.name) {
                Some(location) if location != attribute.location => {
                    return Err(LayoutError::LocationMismatch {
                        name: attribute.name.clone(),
                        layout: attribute.location,
                        program: location,
                    });
                }
                Some(_) => (),
                None => log::warn!(
                    "Attribute '{}' is not active in the shader program",
                    attribute.name
                ),
            }
        }
        Ok(())
    }
}
