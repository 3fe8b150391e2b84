use {
    anyhow::Result,
    indoc::indoc,
    learngl::{
        application::{Application, GlfwWindow, State, WindowConfig},
        graphics::gl_api::{
            Buffer, BufferTarget, ShaderProgram, Vertex, VertexArray,
            VertexLayout,
        },
    },
    memoffset::offset_of,
    std::{mem::size_of, rc::Rc},
};

const VERTEX: &str = indoc! {"
    #version 330 core
    layout (location = 0) in vec3 aPos;
    layout (location = 1) in vec3 aColor;

    out vec3 ourColor;

    void main() {
        gl_Position = vec4(aPos, 1.0);
        ourColor = aColor;
    }
"};

const FRAGMENT: &str = indoc! {"
    #version 330 core
    in vec3 ourColor;
    out vec4 FragColor;

    uniform float brightness;

    void main() {
        FragColor = vec4(ourColor * brightness, 1.0);
    }
"};

#[derive(Debug, Copy, Clone)]
#[repr(C)]
struct ColoredVertex {
    pos: [f32; 3],
    color: [f32; 3],
}

impl Vertex for ColoredVertex {
    fn layout() -> VertexLayout {
        VertexLayout::new(size_of::<Self>())
            .with_attribute("aPos", 0, 3, offset_of!(Self, pos))
            .with_attribute("aColor", 1, 3, offset_of!(Self, color))
    }
}

#[rustfmt::skip]
const TRIANGLE: [ColoredVertex; 3] = [
    ColoredVertex { pos: [ 0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },
    ColoredVertex { pos: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    ColoredVertex { pos: [ 0.0,  0.5, 0.0], color: [0.0, 0.0, 1.0] },
];

struct VertexColors {
    program: ShaderProgram,
    vertex_array: VertexArray,
}

impl State for VertexColors {
    fn new(window: &mut GlfwWindow) -> Result<Self> {
        let gl = window.gl();
        let program =
            ShaderProgram::from_sources(gl.clone(), VERTEX, FRAGMENT)?;

        let layout = ColoredVertex::layout();
        layout.check_program(&program)?;

        let vertices =
            Buffer::new(gl.clone(), BufferTarget::Vertices, &TRIANGLE);
        let vertex_array =
            VertexArray::new(gl, Rc::new(vertices), None, &layout)?;

        Ok(Self {
            program,
            vertex_array,
        })
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

    fn update(&mut self, window: &mut GlfwWindow) -> Result<()> {
        let brightness = 0.75 + 0.25 * window.time().sin() as f32;
        self.program.set_uniform("brightness", brightness);
        self.vertex_array.draw_arrays(TRIANGLE.len() as i32);
        Ok(())
    }
}

fn main() -> Result<()> {
    Application::<VertexColors>::run_with(
        WindowConfig::default().with_title("Vertex Colors"),
    )
}
