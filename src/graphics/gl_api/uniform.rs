use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// A value which can be uploaded to a shader uniform.
///
/// Matrices are stored column-major, which is what nalgebra uses and what
/// OpenGL expects when `transpose` is false.
#[derive(Debug, Clone, PartialEq)]
pub enum Uniform {
    Int(i32),
    UInt(u32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
}

impl From<bool> for Uniform {
    /// GLSL booleans are set through the integer setters.
    fn from(value: bool) -> Self {
        Uniform::Int(value as i32)
    }
}

impl From<i32> for Uniform {
    fn from(value: i32) -> Self {
        Uniform::Int(value)
    }
}

impl From<u32> for Uniform {
    fn from(value: u32) -> Self {
        Uniform::UInt(value)
    }
}

impl From<f32> for Uniform {
    fn from(value: f32) -> Self {
        Uniform::Float(value)
    }
}

impl From<[f32; 2]> for Uniform {
    fn from(value: [f32; 2]) -> Self {
        Uniform::Vec2(value)
    }
}

impl From<[f32; 3]> for Uniform {
    fn from(value: [f32; 3]) -> Self {
        Uniform::Vec3(value)
    }
}

impl From<[f32; 4]> for Uniform {
    fn from(value: [f32; 4]) -> Self {
        Uniform::Vec4(value)
    }
}

impl From<Vector2<f32>> for Uniform {
    fn from(value: Vector2<f32>) -> Self {
        Uniform::Vec2([value.x, value.y])
    }
}

impl From<Vector3<f32>> for Uniform {
    fn from(value: Vector3<f32>) -> Self {
        Uniform::Vec3([value.x, value.y, value.z])
    }
}

impl From<Vector4<f32>> for Uniform {
    fn from(value: Vector4<f32>) -> Self {
        Uniform::Vec4([value.x, value.y, value.z, value.w])
    }
}

impl From<Matrix3<f32>> for Uniform {
    fn from(value: Matrix3<f32>) -> Self {
        let mut data = [0.0; 9];
        data.copy_from_slice(value.as_slice());
        Uniform::Mat3(data)
    }
}

impl From<&Matrix4<f32>> for Uniform {
    fn from(value: &Matrix4<f32>) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(value.as_slice());
        Uniform::Mat4(data)
    }
}

impl From<Matrix4<f32>> for Uniform {
    fn from(value: Matrix4<f32>) -> Self {
        Uniform::from(&value)
    }
}
