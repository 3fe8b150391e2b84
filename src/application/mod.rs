//! The reusable harness every demo runs inside.
//!
//! # Example
//!
//! ```no_run
//! use {
//!     anyhow::Result,
//!     learngl::application::{Application, GlfwWindow, State},
//! };
//!
//! struct Empty;
//!
//! impl State for Empty {
//!     fn new(_window: &mut GlfwWindow) -> Result<Self> {
//!         Ok(Self)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     Application::<Empty>::run()
//! }
//! ```

mod config;
mod glfw_window;

pub mod logging;

use {
    anyhow::Result,
    glfw::{Action, Key, WindowEvent},
};

pub use self::{
    config::WindowConfig,
    glfw_window::{EventReceiver, GlfwWindow},
};

/// Application state is created once the window and OpenGL context exist and
/// is dropped before either is destroyed.
pub trait State: Sized {
    /// Create the state. Shader programs, buffers, and textures are usually
    /// built here.
    fn new(window: &mut GlfwWindow) -> Result<Self>;

    /// Handle a single window event.
    ///
    /// The harness already closes the window on Escape and resizes the
    /// viewport when the framebuffer changes size.
    fn handle_event(
        &mut self,
        _window: &mut GlfwWindow,
        _window_event: WindowEvent,
    ) -> Result<()> {
        Ok(())
    }

    /// Render one frame. The framebuffer is cleared before this is called and
    /// presented after it returns.
    fn update(&mut self, _window: &mut GlfwWindow) -> Result<()> {
        Ok(())
    }
}

/// Owns the window and application state and drives the main loop.
pub struct Application<S: State> {
    // Fields drop in declaration order, the state must go before the window.
    state: S,
    clear_color: [f32; 4],
    window: GlfwWindow,
}

impl<S: State> Application<S> {
    /// Run the application with the default window configuration.
    pub fn run() -> Result<()> {
        Self::run_with(WindowConfig::default())
    }

    /// Run the application, blocks until the main event loop exits.
    pub fn run_with(config: WindowConfig) -> Result<()> {
        logging::setup()?;

        let mut window = GlfwWindow::new(&config)?;
        let state = S::new(&mut window)?;
        let app = Self {
            state,
            clear_color: config.clear_color,
            window,
        };
        app.main_loop()
    }

    /// Main window event loop. Events are dispatched to the state before
    /// each frame.
    fn main_loop(mut self) -> Result<()> {
        let event_receiver = self.window.take_event_receiver()?;

        while !self.window.should_close() {
            for (_, event) in self.window.flush_window_events(&event_receiver) {
                log::trace!("{:?}", event);
                self.handle_event(&event);
                self.state.handle_event(&mut self.window, event)?;
            }

            self.window.gl().clear(self.clear_color);
            self.state.update(&mut self.window)?;
            self.window.swap_buffers();
        }

        Ok(())
    }

    /// Events every demo responds to the same way.
    fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::FramebufferSize(width, height) => {
                self.window.gl().viewport(width, height);
            }
            WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                self.window.set_should_close(true);
            }
            _ => (),
        }
    }
}
