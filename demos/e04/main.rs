use {
    anyhow::Result,
    image::{DynamicImage, Rgba, RgbaImage},
    learngl::{
        application::{Application, GlfwWindow, State, WindowConfig},
        graphics::gl_api::{
            Buffer, BufferTarget, ShaderProgram, Texture2D, Vertex,
            VertexArray, VertexLayout,
        },
        math::projections,
    },
    memoffset::offset_of,
    std::{mem::size_of, rc::Rc},
};

const VERTEX_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/demos/e04/shaders/quad.vert");
const FRAGMENT_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/demos/e04/shaders/quad.frag");
const TEXTURE_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/demos/e04/textures/crate.png");

#[derive(Debug, Copy, Clone)]
#[repr(C)]
struct TexturedVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

impl Vertex for TexturedVertex {
    fn layout() -> VertexLayout {
        VertexLayout::new(size_of::<Self>())
            .with_attribute("aPos", 0, 2, offset_of!(Self, pos))
            .with_attribute("aTexCoord", 1, 2, offset_of!(Self, uv))
    }
}

#[rustfmt::skip]
const QUAD: [TexturedVertex; 4] = [
    TexturedVertex { pos: [-0.75, -0.75], uv: [0.0, 0.0] },
    TexturedVertex { pos: [ 0.75, -0.75], uv: [2.0, 0.0] },
    TexturedVertex { pos: [ 0.75,  0.75], uv: [2.0, 2.0] },
    TexturedVertex { pos: [-0.75,  0.75], uv: [0.0, 2.0] },
];

const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

fn checkerboard(size: u32, cells: u32) -> DynamicImage {
    let cell = (size / cells).max(1);
    let image = RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([230, 230, 230, 255])
        } else {
            Rgba([40, 90, 120, 255])
        }
    });
    DynamicImage::ImageRgba8(image)
}

struct TexturedQuad {
    program: ShaderProgram,
    texture: Texture2D,
    vertex_array: VertexArray,
}

impl TexturedQuad {
    fn update_projection(&self, width: i32, height: i32) {
        self.program.set_uniform(
            "projection",
            projections::aspect_ortho(width, height),
        );
    }
}

impl State for TexturedQuad {
    fn new(window: &mut GlfwWindow) -> Result<Self> {
        let gl = window.gl();
        let program =
            ShaderProgram::from_files(gl.clone(), VERTEX_PATH, FRAGMENT_PATH)?;

        let layout = TexturedVertex::layout();
        layout.check_program(&program)?;

        let vertices = Buffer::new(gl.clone(), BufferTarget::Vertices, &QUAD);
        let indices = Buffer::new(gl.clone(), BufferTarget::Indices, &INDICES);
        let vertex_array = VertexArray::new(
            gl.clone(),
            Rc::new(vertices),
            Some(Rc::new(indices)),
            &layout,
        )?;

        let texture = match Texture2D::from_file(gl.clone(), TEXTURE_PATH) {
            Ok(texture) => texture,
            Err(err) => {
                log::error!("Failed to load texture: {}", err);
                Texture2D::from_image(gl, &checkerboard(256, 8))?
            }
        };
        log::info!("Quad texture is {:?}", texture.size());

        let quad = Self {
            program,
            texture,
            vertex_array,
        };
        quad.program.set_uniform("quadTexture", 0i32);
        let (width, height) = window.get_framebuffer_size();
        quad.update_projection(width, height);
        Ok(quad)
    }

    fn handle_event(
        &mut self,
        window: &mut GlfwWindow,
        window_event: glfw::WindowEvent,
    ) -> Result<()> {
        use glfw::{Action, Key, WindowEvent};
        match window_event {
            WindowEvent::FramebufferSize(width, height) => {
                self.update_projection(width, height);
            }
            WindowEvent::Key(Key::Space, _, Action::Release, _) => {
                window.toggle_fullscreen()?;
            }
            _ => (),
        }
        Ok(())
    }

    fn update(&mut self, _window: &mut GlfwWindow) -> Result<()> {
        self.program.activate();
        self.texture.bind(0);
        self.vertex_array.draw_elements(INDICES.len() as i32);
        Ok(())
    }
}

fn main() -> Result<()> {
    Application::<TexturedQuad>::run_with(
        WindowConfig::default().with_title("Textured Quad"),
    )
}
