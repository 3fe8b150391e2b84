use {
    anyhow::Result,
    learngl::application::{Application, GlfwWindow, State, WindowConfig},
};

struct ClearWindow;

impl State for ClearWindow {
    fn new(_window: &mut GlfwWindow) -> Result<Self> {
        Ok(Self)
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
}

fn main() -> Result<()> {
    Application::<ClearWindow>::run_with(
        WindowConfig::default().with_title("Hello Window"),
    )
}
