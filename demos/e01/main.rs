use {
    anyhow::Result,
    indoc::indoc,
    learngl::{
        application::{Application, GlfwWindow, State, WindowConfig},
        graphics::gl_api::{
            Buffer, BufferTarget, ShaderProgram, VertexArray, VertexLayout,
        },
    },
    std::rc::Rc,
};

const VERTEX: &str = indoc! {"
    #version 330 core
    layout (location = 0) in vec3 aPos;

    void main() {
        gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
    }
"};

const FRAGMENT: &str = indoc! {"
    #version 330 core
    out vec4 FragColor;

    void main() {
        FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
    }
"};

#[rustfmt::skip]
const TRIANGLE: [[f32; 3]; 3] = [
    [-0.5, -0.5, 0.0],
    [ 0.5, -0.5, 0.0],
    [ 0.0,  0.5, 0.0],
];

struct HelloTriangle {
    program: ShaderProgram,
    vertex_array: VertexArray,
}

impl State for HelloTriangle {
    fn new(window: &mut GlfwWindow) -> Result<Self> {
        let gl = window.gl();
        let program =
            ShaderProgram::from_sources(gl.clone(), VERTEX, FRAGMENT)?;

        let vertices =
            Buffer::new(gl.clone(), BufferTarget::Vertices, &TRIANGLE);
        let layout = VertexLayout::new(std::mem::size_of::<[f32; 3]>())
            .with_attribute("aPos", 0, 3, 0);
        layout.check_program(&program)?;
        let vertex_array =
            VertexArray::new(gl, Rc::new(vertices), None, &layout)?;

        Ok(Self {
            program,
            vertex_array,
        })
    }

    fn update(&mut self, _window: &mut GlfwWindow) -> Result<()> {
        self.program.activate();
        self.vertex_array.draw_arrays(TRIANGLE.len() as i32);
        Ok(())
    }
}

fn main() -> Result<()> {
    Application::<HelloTriangle>::run_with(
        WindowConfig::default().with_title("Hello Triangle"),
    )
}
