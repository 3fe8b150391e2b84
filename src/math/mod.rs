pub type Mat4 = nalgebra::Matrix4<f32>;

pub mod projections {
    use super::Mat4;

    /// Build an orthographic projection matrix which transforms the given
    /// coordinate bounds to the OpenGL view volume.
    /// e.g. Input Values will be bounded by:
    ///  - x in [left, right]
    ///  - y in [bottom, top]
    ///  - z in [near, far]
    ///
    /// Output coordinates will be transformed to:
    ///  - left -> -1.0, right -> 1.0
    ///  - bottom -> -1.0, top -> 1.0
    ///  - near -> -1.0, far -> 1.0
    ///
    pub fn ortho(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        let mh = 2.0 / (right - left);
        let bh = (right + left) / (left - right);
        let mv = 2.0 / (top - bottom);
        let bv = (top + bottom) / (bottom - top);
        let mz = 2.0 / (far - near);
        let bz = (far + near) / (near - far);
        Mat4::new(
            mh, 0.0, 0.0, bh, //
            0.0, mv, 0.0, bv, //
            0.0, 0.0, mz, bz, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// An orthographic projection which keeps a square in world space square
    /// on screen for a viewport of the given size.
    ///
    /// The shorter viewport axis spans [-1, 1].
    pub fn aspect_ortho(width: i32, height: i32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        if aspect >= 1.0 {
            ortho(-aspect, aspect, -1.0, 1.0, -1.0, 1.0)
        } else {
            ortho(-1.0, 1.0, -1.0 / aspect, 1.0 / aspect, -1.0, 1.0)
        }
    }

}
