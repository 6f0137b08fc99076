//! A pretend driver that records calls and applies just enough GLSL rules to fail compiles and
//! links on purpose.
//!
//! A stage compiles if it has a `void main(` entry point, balanced braces, and no empty
//! assignment. Linking fails when the fragment stage declares an `in` variable that the vertex
//! stage has no matching `out` for.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;
use std::rc::Rc;

use crate::driver::ShaderDriver;
use crate::info_log;
use crate::program::ShaderStage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
}

#[derive(Debug)]
struct Shader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: Vec<u8>,
}

#[derive(Debug, Default)]
struct Program {
    attached: Vec<u32>,
    sources: Vec<(ShaderStage, String)>,
    linked: bool,
    log: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    next_name: u32,
    shaders: HashMap<u32, Shader>,
    programs: HashMap<u32, Program>,
    current: u32,
    compile_log: Option<Vec<u8>>,
    calls: Vec<Call>,
}

impl State {
    fn name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeDriver(Rc<RefCell<State>>);

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the log reported for every failed compile.
    pub fn set_compile_log(&self, log: Vec<u8>) {
        self.0.borrow_mut().compile_log = Some(log);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn live_shaders(&self) -> usize {
        self.0.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.0.borrow().programs.len()
    }

    pub fn is_program(&self, id: u32) -> bool {
        self.0.borrow().programs.contains_key(&id)
    }
}

/// Splits source into `;`/`{`/`}` separated statements of whitespace separated tokens.
/// Preprocessor lines are skipped and statements don't span lines.
fn statements(source: &str) -> Vec<Vec<&str>> {
    source.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ';' || c == '{' || c == '}'))
        .map(|s| s.split_whitespace().collect::<Vec<_>>())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Names declared as `<qualifier> <type> <name>`.
fn declared<'a>(source: &'a str, qualifier: &str) -> Vec<&'a str> {
    statements(source)
        .into_iter()
        .filter(|s| s.len() == 3 && s[0] == qualifier)
        .map(|s| s[2])
        .collect()
}

fn compile_error(source: &str) -> Option<String> {
    if !source.contains("void main(") {
        return Some(String::from("0:1(1): error: no function with name 'main'\n"));
    }
    if source.matches('{').count() != source.matches('}').count() {
        return Some(String::from("0:1(1): error: syntax error, unexpected end of file\n"));
    }
    if source.contains("= ;") {
        return Some(String::from("0:2(30): error: syntax error, unexpected ';'\n"));
    }
    None
}

/// Mimics `glGet*InfoLog` with a buffer sized from the reported log length.
fn bounded(log: &[u8]) -> Vec<u8> {
    if log.is_empty() {
        return vec![];
    }
    let size = info_log::buffer_len(log.len() as i32 + 1);
    let mut out = log[..log.len().min(size - 1)].to_vec();
    out.push(0);
    out
}

impl ShaderDriver for FakeDriver {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::CreateShader(stage));
        let id = state.name();
        state.shaders.insert(id, Shader { stage, source: String::new(), compiled: false, log: vec![] });
        id
    }

    fn compile_shader(&self, shader: u32, source: &CStr) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::CompileShader(shader));
        let override_log = state.compile_log.clone();

        let entry = state.shaders.get_mut(&shader).expect("compiling a deleted shader");
        entry.source = source.to_string_lossy().into_owned();
        match compile_error(&entry.source) {
            None => entry.compiled = true,
            Some(log) => {
                entry.compiled = false;
                entry.log = override_log.unwrap_or_else(|| log.into_bytes());
            }
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.0.borrow().shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: u32) -> Vec<u8> {
        bounded(&self.0.borrow().shaders[&shader].log)
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::DeleteShader(shader));
        state.shaders.remove(&shader);
    }

    fn create_program(&self) -> u32 {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::CreateProgram);
        let id = state.name();
        state.programs.insert(id, Program::default());
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::AttachShader(program, shader));
        state.programs.get_mut(&program).expect("no such program").attached.push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::DetachShader(program, shader));
        state.programs.get_mut(&program).expect("no such program").attached.retain(|&s| s != shader);
    }

    fn link_program(&self, program: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::LinkProgram(program));

        let attached = state.programs[&program].attached.clone();
        let sources: Vec<(ShaderStage, String)> = attached.iter()
            .map(|id| {
                let shader = &state.shaders[id];
                assert!(shader.compiled, "linking a shader that did not compile");
                (shader.stage, shader.source.clone())
            })
            .collect();

        let outputs: Vec<&str> = sources.iter()
            .filter(|(stage, _)| *stage == ShaderStage::Vertex)
            .flat_map(|(_, src)| declared(src, "out"))
            .collect();
        let missing: Vec<&str> = sources.iter()
            .filter(|(stage, _)| *stage == ShaderStage::Fragment)
            .flat_map(|(_, src)| declared(src, "in"))
            .filter(|name| !outputs.contains(name))
            .collect();

        let log = missing.iter()
            .map(|name| format!("error: fragment shader input `{}' has no matching vertex output\n", name))
            .collect::<String>();
        let linked = missing.is_empty();

        let entry = state.programs.get_mut(&program).expect("no such program");
        entry.linked = linked;
        entry.log = log.into_bytes();
        entry.sources = sources;
    }

    fn link_status(&self, program: u32) -> bool {
        self.0.borrow().programs[&program].linked
    }

    fn program_info_log(&self, program: u32) -> Vec<u8> {
        bounded(&self.0.borrow().programs[&program].log)
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::DeleteProgram(program));
        state.programs.remove(&program);
        if state.current == program {
            state.current = 0;
        }
    }

    fn use_program(&self, program: u32) {
        let mut state = self.0.borrow_mut();
        state.calls.push(Call::UseProgram(program));
        assert!(state.programs[&program].linked, "using a program that did not link");
        state.current = program;
    }

    fn current_program(&self) -> u32 {
        self.0.borrow().current
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        let state = self.0.borrow();
        let name = name.to_string_lossy();
        state.programs[&program].sources.iter()
            .flat_map(|(_, src)| declared(src, "uniform"))
            .position(|n| n == name)
            .map(|n| n as i32)
            .unwrap_or(-1)
    }
}
