use {
    super::{
        diagnostic, GlContext, ShaderApi, ShaderError, ShaderSource,
        ShaderStage, Uniform,
    },
    indoc::indoc,
    scopeguard::ScopeGuard,
    std::{
        cell::RefCell, collections::HashMap, ffi::CString, path::Path, rc::Rc,
    },
};

/// An owned, linked GPU shader program built from a vertex and fragment
/// stage.
///
/// A ShaderProgram only exists once linking has succeeded. Any failure while
/// compiling or linking is returned as a `ShaderError` and every device
/// object created along the way is released before construction returns.
/// The program itself is deleted when the value is dropped.
///
/// The "current program" is global device state. Activating a program
/// affects every draw call until some other program is activated, so callers
/// should activate the program they expect right before drawing.
pub struct ShaderProgram<A: ShaderApi = GlContext> {
    raw: u32,
    info_log: String,
    uniform_locations: RefCell<HashMap<String, Option<i32>>>,
    api: Rc<A>,
}

// Public API
// ----------

impl<A: ShaderApi> ShaderProgram<A> {
    /// Compile and link a new shader program.
    ///
    /// # Params
    ///
    /// * `api` - the device the program is created on. The device context
    ///   must be current on this thread.
    /// * `source` - the vertex and fragment stage source text
    ///
    /// # Returns
    ///
    /// * `ShaderError::InvalidSource` if either stage contains a NUL byte
    /// * `ShaderError::Compile` for the first stage the compiler rejects
    /// * `ShaderError::Link` if the compiled stages cannot be linked
    pub fn new(api: Rc<A>, source: &ShaderSource) -> Result<Self, ShaderError> {
        let raw = {
            let device = api.as_ref();

            // Both stage guards are dropped when this block exits, so the
            // stage objects are deleted on every path out of it.
            let vertex = compile_stage(device, ShaderStage::Vertex, source)?;
            let fragment =
                compile_stage(device, ShaderStage::Fragment, source)?;

            let program = scopeguard::guard(device.create_program(), |raw| {
                device.delete_program(raw)
            });
            device.attach_shader(*program, *vertex);
            device.attach_shader(*program, *fragment);
            device.link_program(*program);

            if !device.program_link_status(*program) {
                let diagnostic = diagnostic::or_placeholder(
                    device.program_info_log(*program),
                );
                log::error!(
                    indoc!(
                        "
                        Unable to link the shader program!

                        {}"
                    ),
                    diagnostic
                );
                return Err(ShaderError::Link { diagnostic });
            }

            ScopeGuard::into_inner(program)
        };

        let info_log = api.program_info_log(raw).trim().to_owned();
        if !info_log.is_empty() {
            log::warn!(
                "Shader program {} linked with warnings:\n{}",
                raw,
                info_log
            );
        }
        log::debug!("Linked shader program {}", raw);

        Ok(Self {
            raw,
            info_log,
            uniform_locations: RefCell::new(HashMap::new()),
            api,
        })
    }

    /// Compile and link a program from in-memory source text.
    pub fn from_sources(
        api: Rc<A>,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, ShaderError> {
        Self::new(api, &ShaderSource::new(vertex, fragment))
    }

    /// Read both stages from disk, then compile and link them.
    ///
    /// An unreadable file is reported as `ShaderError::SourceUnavailable`
    /// before any device call is made.
    pub fn from_files(
        api: Rc<A>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let source = ShaderSource::from_files(vertex_path, fragment_path)
            .map_err(|err| {
                log::error!("{}", err);
                err
            })?;
        Self::new(api, &source)
    }

    /// Make this the active program on the device.
    ///
    /// The program stays active until another program is activated.
    pub fn activate(&self) {
        self.api.use_program(self.raw);
    }

    /// Upload a value to the named uniform.
    ///
    /// The program is activated first because the device writes uniforms to
    /// whichever program is current. Names which don't match an active
    /// uniform are skipped so callers can set optional uniforms without
    /// checking for them first.
    pub fn set_uniform(&self, name: &str, value: impl Into<Uniform>) {
        let location = match self.uniform_location(name) {
            Some(location) => location,
            None => return,
        };
        self.activate();
        self.api.set_uniform(location, &value.into());
    }

    /// The location of the named uniform, if the linked program uses it.
    ///
    /// Results are cached per name, misses included.
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        if let Some(location) = self.uniform_locations.borrow().get(name) {
            return *location;
        }

        let location = CString::new(name)
            .ok()
            .map(|cname| self.api.uniform_location(self.raw, &cname))
            .filter(|&location| location >= 0);
        if location.is_none() {
            log::debug!(
                "Uniform '{}' is not active in shader program {}",
                name,
                self.raw
            );
        }

        self.uniform_locations
            .borrow_mut()
            .insert(name.to_owned(), location);
        location
    }

    /// The location of the named vertex attribute, if the linked program
    /// uses it.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        let cname = CString::new(name).ok()?;
        let location = self.api.attribute_location(self.raw, &cname);
        u32::try_from(location).ok()
    }

    /// The linker's log for a successful link. Usually empty.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }

    /// The raw device handle for this program.
    ///
    /// # Safety
    ///
    /// Unsafe because ownership is not transferred. The caller must not use
    /// the handle after this ShaderProgram has been dropped.
    pub unsafe fn raw(&self) -> u32 {
        self.raw
    }
}

impl<A: ShaderApi> Drop for ShaderProgram<A> {
    fn drop(&mut self) {
        self.api.delete_program(self.raw);
    }
}

impl<A: ShaderApi> std::fmt::Debug for ShaderProgram<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("raw", &self.raw)
            .field("info_log", &self.info_log)
            .finish()
    }
}

// Private API
// -----------

/// Compile a single stage.
///
/// The returned guard deletes the shader object when it is dropped.
fn compile_stage<'api, A: ShaderApi>(
    api: &'api A,
    stage: ShaderStage,
    source: &ShaderSource,
) -> Result<ScopeGuard<u32, impl FnOnce(u32) + 'api>, ShaderError> {
    let text = source.stage(stage);
    let c_text = CString::new(text)
        .map_err(|source| ShaderError::InvalidSource { stage, source })?;

    let shader =
        scopeguard::guard(api.create_shader(stage), move |raw| {
            api.delete_shader(raw)
        });
    api.shader_source(*shader, &c_text);
    api.compile_shader(*shader);

    if !api.shader_compile_status(*shader) {
        let diagnostic =
            diagnostic::or_placeholder(api.shader_info_log(*shader));
        log::error!(
            indoc!(
                "
                Unable to compile the {} shader!

                {}"
            ),
            stage,
            diagnostic::annotate(text, &diagnostic)
        );
        return Err(ShaderError::Compile { stage, diagnostic });
    }

    Ok(shader)
}
