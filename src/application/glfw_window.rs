use {
    super::WindowConfig,
    crate::graphics::gl_api::GlContext,
    anyhow::{Context as _, Result},
    glfw::{
        Context, GlfwReceiver, OpenGlProfileHint, SwapInterval, WindowEvent,
        WindowHint, WindowMode,
    },
    std::rc::Rc,
};

/// The receiver for a window's events.
pub type EventReceiver = GlfwReceiver<(f64, WindowEvent)>;

/// All resources required for running a single-windowed GLFW application which
/// renders with OpenGL.
///
/// GlfwWindow derefs as a raw GLFW window handle so application state can
/// configure the window however is convenient.
pub struct GlfwWindow {
    window_pos: (i32, i32),
    window_size: (i32, i32),

    /// Function pointers for the context owned by `window_handle`.
    gl: Rc<GlContext>,
    window_handle: glfw::PWindow,

    /// The receiver for the Window's events.
    pub(super) event_receiver: Option<EventReceiver>,

    /// The GLFW library instance.
    pub(super) glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Create a new GLFW window with a current OpenGL core profile context.
    ///
    /// # Params
    ///
    /// * `config` - the window's title, size, and requested OpenGL version
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        if cfg!(target_os = "macos") {
            glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        }
        glfw.window_hint(WindowHint::Resizable(config.resizable));

        let (mut window_handle, event_receiver) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                WindowMode::Windowed,
            )
            .context("Creating the GLFW Window failed!")?;

        window_handle.make_current();
        glfw.set_swap_interval(if config.vsync {
            SwapInterval::Sync(1)
        } else {
            SwapInterval::None
        });
        window_handle.set_framebuffer_size_polling(true);
        window_handle.set_key_polling(true);

        let gl = unsafe {
            // Safe because the context was just made current and the window
            // which owns it is dropped after the GlContext.
            GlContext::load_with(|symbol| {
                window_handle.get_proc_address(symbol) as *const _
            })?
        };
        let (width, height) = window_handle.get_framebuffer_size();
        gl.viewport(width, height);

        Ok(Self {
            window_pos: window_handle.get_pos(),
            window_size: window_handle.get_size(),
            gl,
            event_receiver: Some(event_receiver),
            window_handle,
            glfw,
        })
    }

    /// The OpenGL context owned by this window.
    pub fn gl(&self) -> Rc<GlContext> {
        self.gl.clone()
    }

    /// Take ownership of this window's event receiver.
    pub fn take_event_receiver(&mut self) -> Result<EventReceiver> {
        self.event_receiver
            .take()
            .context("The window's event receiver has already been taken")
    }

    /// Poll GLFW for window events and flush out into an iterator.
    pub fn flush_window_events<'events>(
        &mut self,
        event_receiver: &'events EventReceiver,
    ) -> glfw::FlushedMessages<'events, (f64, WindowEvent)> {
        self.glfw.poll_events();
        glfw::flush_messages(event_receiver)
    }

    /// Present the frame which was just rendered.
    pub fn swap_buffers(&mut self) {
        self.window_handle.swap_buffers();
    }

    /// Seconds since GLFW was initialized.
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Toggle application fullscreen.
    ///
    /// If the window is currently windowed then swap to fullscreen using
    /// whatever the primary monitor advertises as the primary video mode.
    ///
    /// If the window is currently fullscreen, then swap to windowed and
    /// restore the window's previous size and location.
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        let is_fullscreen =
            self.window_handle.with_window_mode(|mode| match mode {
                WindowMode::Windowed => false,
                WindowMode::FullScreen(_) => true,
            });

        if is_fullscreen {
            let (x, y) = self.window_pos;
            let (w, h) = self.window_size;
            self.window_handle.set_monitor(
                WindowMode::Windowed,
                x,
                y,
                w as u32,
                h as u32,
                None,
            );
        } else {
            // Record the size and position of the non-fullscreen window
            // before switching modes.
            self.window_size = self.window_handle.get_size();
            self.window_pos = self.window_handle.get_pos();
            let window = &mut self.window_handle;
            self.glfw.with_primary_monitor(|_, monitor_opt| -> Result<()> {
                let monitor = monitor_opt
                    .context("Unable to determine the primary monitor!")?;
                let video_mode = monitor.get_video_mode().context(
                    "Unable to get a primary video mode for the primary monitor!",
                )?;
                window.set_monitor(
                    WindowMode::FullScreen(monitor),
                    0,
                    0,
                    video_mode.width,
                    video_mode.height,
                    Some(video_mode.refresh_rate),
                );
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl std::ops::Deref for GlfwWindow {
    type Target = glfw::Window;

    fn deref(&self) -> &Self::Target {
        &self.window_handle
    }
}

impl std::ops::DerefMut for GlfwWindow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.window_handle
    }
}
