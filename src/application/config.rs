/// Settings for the application window and its OpenGL context.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// The title shown on the window's top bar.
    pub title: String,

    /// The initial window width in screen coordinates.
    pub width: u32,

    /// The initial window height in screen coordinates.
    pub height: u32,

    /// The (major, minor) OpenGL core profile version to request.
    pub gl_version: (u32, u32),

    /// Wait for vertical sync when swapping buffers.
    pub vsync: bool,

    pub resizable: bool,

    /// The color the framebuffer is cleared to at the start of every frame.
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_owned(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            vsync: true,
            resizable: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl WindowConfig {
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    pub fn with_gl_version(self, major: u32, minor: u32) -> Self {
        Self {
            gl_version: (major, minor),
            ..self
        }
    }

    pub fn with_vsync(self, vsync: bool) -> Self {
        Self { vsync, ..self }
    }

    pub fn with_clear_color(self, clear_color: [f32; 4]) -> Self {
        Self {
            clear_color,
            ..self
        }
    }
}
