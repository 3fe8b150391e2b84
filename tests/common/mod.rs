//! A fake graphics driver for exercising shader programs without a GPU.
//!
//! The fake "compiles" GLSL with a few simple rules: a version directive must
//! come first and every bracket must be balanced. Linking requires both
//! stages to define main() and every fragment input to match a vertex output
//! by name and type. Uniform and attribute locations are assigned from the
//! declarations. Every handle the driver hands out and deletes is recorded so
//! tests can check resource lifetimes.

#![allow(dead_code)]

use {
    learngl::graphics::gl_api::{ShaderApi, ShaderStage, Uniform},
    regex::Regex,
    std::{cell::RefCell, collections::HashMap, ffi::CStr},
};

pub const VERTEX: &str = concat!(
    "#version 330 core\n",
    "layout(location=0) in vec3 aPos;\n",
    "void main(){gl_Position=vec4(aPos,1.0);}",
);

pub const FRAGMENT: &str = concat!(
    "#version 330 core\n",
    "out vec4 FragColor;\n",
    "void main(){FragColor=vec4(1.0);}",
);

pub const FRAGMENT_WITH_TYPO: &str = concat!(
    "#version 330 core\n",
    "out vec4 FragColor;\n",
    "void main(){FragColor = vec4(1.0;}",
);

#[derive(Debug, Clone)]
struct FakeShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Clone, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: HashMap<String, i32>,
    attributes: HashMap<String, i32>,
}

#[derive(Debug, Default)]
struct DriverState {
    next_handle: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    created_shaders: Vec<u32>,
    created_programs: Vec<u32>,
    deleted_shaders: Vec<u32>,
    deleted_programs: Vec<u32>,
    active_program: u32,
    uniform_lookups: usize,
    uploads: Vec<(u32, i32, Uniform)>,
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    silent_logs: bool,
    state: RefCell<DriverState>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver which reports failures with empty info logs.
    pub fn silent() -> Self {
        Self {
            silent_logs: true,
            ..Self::default()
        }
    }

    pub fn created_shaders(&self) -> Vec<u32> {
        self.state.borrow().created_shaders.clone()
    }

    pub fn created_programs(&self) -> Vec<u32> {
        self.state.borrow().created_programs.clone()
    }

    pub fn deleted_shaders(&self) -> Vec<u32> {
        self.state.borrow().deleted_shaders.clone()
    }

    pub fn deleted_programs(&self) -> Vec<u32> {
        self.state.borrow().deleted_programs.clone()
    }

    pub fn active_program(&self) -> u32 {
        self.state.borrow().active_program
    }

    pub fn uniform_lookups(&self) -> usize {
        self.state.borrow().uniform_lookups
    }

    /// Every uniform upload as (active program, location, value).
    pub fn uploads(&self) -> Vec<(u32, i32, Uniform)> {
        self.state.borrow().uploads.clone()
    }

    /// True when every handle the driver created was deleted exactly once.
    pub fn everything_released_once(&self) -> bool {
        let state = self.state.borrow();
        released_once(&state.created_shaders, &state.deleted_shaders)
            && released_once(&state.created_programs, &state.deleted_programs)
    }

    fn next_handle(state: &mut DriverState) -> u32 {
        state.next_handle += 1;
        state.next_handle
    }

    fn log(&self, message: String) -> String {
        if self.silent_logs {
            String::new()
        } else {
            message
        }
    }
}

fn released_once(created: &[u32], deleted: &[u32]) -> bool {
    let mut created = created.to_vec();
    let mut deleted = deleted.to_vec();
    created.sort_unstable();
    deleted.sort_unstable();
    created == deleted
}

/// A declaration of the form `[layout(location = N)] [flat] in|out|uniform
/// type name;`.
#[derive(Debug, Clone, PartialEq)]
struct Declaration {
    location: Option<i32>,
    qualifier: String,
    ty: String,
    name: String,
}

fn declarations(source: &str) -> Vec<Declaration> {
    let pattern = Regex::new(concat!(
        r"(?m)^\s*(?:layout\s*\(\s*location\s*=\s*(?P<loc>\d+)\s*\)\s*)?",
        r"(?:flat\s+|smooth\s+|noperspective\s+)?",
        r"(?P<qual>in|out|uniform)\s+(?P<ty>\w+)\s+(?P<name>\w+)\s*;"
    ))
    .unwrap();
    pattern
        .captures_iter(source)
        .map(|caps| Declaration {
            location: caps.name("loc").and_then(|m| m.as_str().parse().ok()),
            qualifier: caps["qual"].to_owned(),
            ty: caps["ty"].to_owned(),
            name: caps["name"].to_owned(),
        })
        .collect()
}

/// Compile by the fake's rules, returning a Mesa-style error on failure.
fn compile(source: &str) -> Result<(), String> {
    let first_line = source.lines().find(|line| !line.trim().is_empty());
    if !first_line.map_or(false, |line| line.trim().starts_with("#version")) {
        return Err("0:1(1): error: #version directive is required".to_owned());
    }

    let mut open: Vec<char> = vec![];
    for (line_index, line) in source.lines().enumerate() {
        for (column, c) in line.chars().enumerate() {
            let expected_open = match c {
                '(' | '{' | '[' => {
                    open.push(c);
                    continue;
                }
                ')' => '(',
                '}' => '{',
                ']' => '[',
                _ => continue,
            };
            if open.pop() != Some(expected_open) {
                return Err(format!(
                    "0:{}({}): error: syntax error, unexpected '{}'",
                    line_index + 1,
                    column + 1,
                    c
                ));
            }
        }
    }
    if !open.is_empty() {
        let last_line = source.lines().count();
        return Err(format!(
            "0:{}(1): error: syntax error, unexpected end of file",
            last_line
        ));
    }
    Ok(())
}

impl ShaderApi for FakeDriver {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let mut state = self.state.borrow_mut();
        let handle = Self::next_handle(&mut state);
        state.shaders.insert(
            handle,
            FakeShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        state.created_shaders.push(handle);
        handle
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        let mut state = self.state.borrow_mut();
        let fake = state.shaders.get_mut(&shader).expect("unknown shader");
        fake.source = source.to_string_lossy().into_owned();
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let fake = state.shaders.get_mut(&shader).expect("unknown shader");
        match compile(&fake.source) {
            Ok(()) => {
                fake.compiled = true;
                fake.log.clear();
            }
            Err(message) => {
                fake.compiled = false;
                fake.log = self.log(message);
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state.borrow().shaders[&shader].log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.deleted_shaders.push(shader);
    }

    fn create_program(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let handle = Self::next_handle(&mut state);
        state.programs.insert(handle, FakeProgram::default());
        state.created_programs.push(handle);
        handle
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        let fake = state.programs.get_mut(&program).expect("unknown program");
        fake.attached.push(shader);
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let attached = state.programs[&program].attached.clone();
        let stages: Vec<FakeShader> = attached
            .iter()
            .filter_map(|handle| state.shaders.get(handle).cloned())
            .collect();
        let outcome = link(&stages);
        let fake = state.programs.get_mut(&program).expect("unknown program");
        match outcome {
            Ok(linked) => {
                fake.linked = true;
                fake.log = linked.warnings;
                fake.uniforms = linked.uniforms;
                fake.attributes = linked.attributes;
            }
            Err(message) => {
                fake.linked = false;
                fake.log = self.log(message);
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().programs[&program].linked
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state.borrow().programs[&program].log.clone()
    }

    fn use_program(&self, program: u32) {
        self.state.borrow_mut().active_program = program;
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        let mut state = self.state.borrow_mut();
        state.uniform_lookups += 1;
        let name = name.to_string_lossy();
        state
            .programs
            .get(&program)
            .filter(|fake| fake.linked)
            .and_then(|fake| fake.uniforms.get(name.as_ref()).copied())
            .unwrap_or(-1)
    }

    fn attribute_location(&self, program: u32, name: &CStr) -> i32 {
        let state = self.state.borrow();
        let name = name.to_string_lossy();
        state
            .programs
            .get(&program)
            .filter(|fake| fake.linked)
            .and_then(|fake| fake.attributes.get(name.as_ref()).copied())
            .unwrap_or(-1)
    }

    fn set_uniform(&self, location: i32, value: &Uniform) {
        let mut state = self.state.borrow_mut();
        let active = state.active_program;
        state.uploads.push((active, location, value.clone()));
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        if state.active_program == program {
            state.active_program = 0;
        }
        state.programs.remove(&program);
        state.deleted_programs.push(program);
    }
}

struct Linked {
    warnings: String,
    uniforms: HashMap<String, i32>,
    attributes: HashMap<String, i32>,
}

fn link(stages: &[FakeShader]) -> Result<Linked, String> {
    let find = |stage: ShaderStage| {
        stages
            .iter()
            .find(|shader| shader.stage == stage && shader.compiled)
            .ok_or_else(|| {
                format!("error: no compiled {} shader is attached", stage)
            })
    };
    let vertex = find(ShaderStage::Vertex)?;
    let fragment = find(ShaderStage::Fragment)?;

    for shader in [vertex, fragment] {
        if !shader.source.contains("void main") {
            return Err(format!("error: {} shader lacks `main'", shader.stage));
        }
    }

    let vertex_decls = declarations(&vertex.source);
    let fragment_decls = declarations(&fragment.source);
    let vertex_outputs: Vec<&Declaration> = vertex_decls
        .iter()
        .filter(|decl| decl.qualifier == "out")
        .collect();

    let mut warnings = String::new();
    for input in fragment_decls.iter().filter(|decl| decl.qualifier == "in") {
        let matched = vertex_outputs.iter().any(|output| {
            output.name == input.name && output.ty == input.ty
        });
        if !matched {
            return Err(format!(
                "error: fragment shader input `{}' has no matching output in \
                 the previous stage",
                input.name
            ));
        }
    }
    for output in &vertex_outputs {
        let read = fragment_decls
            .iter()
            .any(|decl| decl.qualifier == "in" && decl.name == output.name);
        if !read {
            warnings.push_str(&format!(
                "warning: vertex output `{}' is not read by the fragment \
                 shader\n",
                output.name
            ));
        }
    }

    let mut uniforms = HashMap::new();
    for decl in vertex_decls
        .iter()
        .chain(fragment_decls.iter())
        .filter(|decl| decl.qualifier == "uniform")
    {
        let next = uniforms.len() as i32;
        uniforms.entry(decl.name.clone()).or_insert(next);
    }

    let mut attributes = HashMap::new();
    for (index, decl) in vertex_decls
        .iter()
        .filter(|decl| decl.qualifier == "in")
        .enumerate()
    {
        attributes
            .insert(decl.name.clone(), decl.location.unwrap_or(index as i32));
    }

    Ok(Linked {
        warnings,
        uniforms,
        attributes,
    })
}
