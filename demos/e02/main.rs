use {
    anyhow::Result,
    indoc::indoc,
    learngl::{
        application::{Application, GlfwWindow, State, WindowConfig},
        graphics::gl_api::{
            Buffer, BufferTarget, GlContext, ShaderProgram, ShaderSource,
            VertexArray, VertexLayout,
        },
    },
    std::rc::Rc,
};

const VERTEX: &str = indoc! {"
    #version 330 core
    layout (location = 0) in vec3 aPos;

    void main() {
        gl_Position = vec4(aPos, 1.0);
    }
"};

const FRAGMENT: &str = indoc! {"
    #version 330 core
    out vec4 FragColor;

    uniform vec4 color;

    void main() {
        FragColor = color;
    }
"};

#[rustfmt::skip]
const LEFT: [[f32; 3]; 3] = [
    [-0.9, -0.5, 0.0],
    [-0.0, -0.5, 0.0],
    [-0.45, 0.5, 0.0],
];

#[rustfmt::skip]
const RIGHT: [[f32; 3]; 3] = [
    [0.0, -0.5, 0.0],
    [0.9, -0.5, 0.0],
    [0.45, 0.5, 0.0],
];

/// One triangle with its own program and vertex array.
struct Triangle {
    program: ShaderProgram,
    vertex_array: VertexArray,
}

impl Triangle {
    fn new(
        gl: &Rc<GlContext>,
        corners: &[[f32; 3]; 3],
        color: [f32; 4],
    ) -> Result<Self> {
        let source = ShaderSource::new(VERTEX, FRAGMENT);
        let program = ShaderProgram::new(gl.clone(), &source)?;
        program.set_uniform("color", color);

        let vertices =
            Buffer::new(gl.clone(), BufferTarget::Vertices, corners);
        let layout = VertexLayout::new(std::mem::size_of::<[f32; 3]>())
            .with_attribute("aPos", 0, 3, 0);
        let vertex_array =
            VertexArray::new(gl.clone(), Rc::new(vertices), None, &layout)?;

        Ok(Self {
            program,
            vertex_array,
        })
    }

    fn draw(&self) {
        self.program.activate();
        self.vertex_array.draw_arrays(3);
    }
}

struct TwoTriangles {
    triangles: Vec<Triangle>,
}

impl State for TwoTriangles {
    fn new(window: &mut GlfwWindow) -> Result<Self> {
        let gl = window.gl();
        let triangles = vec![
            Triangle::new(&gl, &LEFT, [1.0, 0.5, 0.2, 1.0])?,
            Triangle::new(&gl, &RIGHT, [1.0, 1.0, 0.0, 1.0])?,
        ];
        Ok(Self { triangles })
    }

    fn handle_event(
        &mut self,
        window: &mut GlfwWindow,
        window_event: glfw::WindowEvent,
    ) -> Result<()> {
        use glfw::{Action, Key, WindowEvent};
        if let WindowEvent::Key(Key::Space, _, Action::Release, _) =
            window_event
        {
            window.toggle_fullscreen()?;
        }
        Ok(())
    }

    fn update(&mut self, _window: &mut GlfwWindow) -> Result<()> {
        for triangle in &self.triangles {
            triangle.draw();
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    Application::<TwoTriangles>::run_with(
        WindowConfig::default().with_title("Two Triangles"),
    )
}
