//! Compiling stages and linking them into programs.
//!
//! The intermediate stage objects never outlive a build: [`CompiledStage`] deletes its shader
//! object on drop, and [`link`] consumes both stages, so they are gone by the time it returns
//! whether or not linking worked. A [`ShaderProgram`] is only ever handed out fully linked.

use std::ffi::CString;
use std::fmt;

use gl;
use log::{debug, error};

use crate::driver::{GlDriver, ShaderDriver};
use crate::error::ShaderError;
use crate::info_log;

/// The pipeline stages a demo program is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex = gl::VERTEX_SHADER as isize,
    Fragment = gl::FRAGMENT_SHADER as isize,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shader object that compiled successfully. Only [`compile_stage`] creates these, so anything
/// passed to [`link`] is known to have compiled.
#[derive(Debug)]
pub struct CompiledStage<D: ShaderDriver> {
    id: u32,
    stage: ShaderStage,
    driver: D,
}

impl<D: ShaderDriver> CompiledStage<D> {
    pub fn id(&self) -> u32 { self.id }

    pub fn stage(&self) -> ShaderStage { self.stage }
}

impl<D: ShaderDriver> Drop for CompiledStage<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// A linked program, owned by whoever built it and deleted when dropped. Dropping it must happen
/// while the context it was built in is still current.
#[derive(Debug)]
pub struct ShaderProgram<D: ShaderDriver = GlDriver> {
    id: u32,
    driver: D,
}

impl ShaderProgram<GlDriver> {
    /// [`build_program`] against the current OpenGL context.
    pub fn from_sources(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        build_program(&GlDriver, vertex_source, fragment_source)
    }
}

impl<D: ShaderDriver> ShaderProgram<D> {
    pub fn id(&self) -> u32 { self.id }

    /// Makes this the program used by subsequent draw calls.
    pub fn set_used(&self) {
        self.driver.use_program(self.id);
    }

    pub fn is_current(&self) -> bool {
        self.driver.current_program() == self.id
    }

    /// Location of the uniform called `name`, or `None` if the program has no such active uniform
    /// (including ones the compiler optimised away).
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        let name = CString::new(name).ok()?;
        match self.driver.uniform_location(self.id, &name) {
            loc if loc < 0 => None,
            loc => Some(loc),
        }
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

/// Compiles the source for a single stage.
///
/// On failure the shader object is deleted and the driver's log, bounded by
/// [`info_log::INFO_LOG_CAPACITY`], is returned in [`ShaderError::Compile`]. Source containing a
/// NUL byte can't be passed to the driver at all and fails the same way without touching it.
pub fn compile_stage<D: ShaderDriver>(
    driver: &D,
    source: &str,
    stage: ShaderStage,
) -> Result<CompiledStage<D>, ShaderError> {
    let source = match CString::new(source) {
        Ok(s) => s,
        Err(e) => {
            let log = format!("source contains a NUL byte at offset {}", e.nul_position());
            error!("Could not compile {} shader: {}", stage, log);
            return Err(ShaderError::Compile { stage, log });
        }
    };

    let shader = CompiledStage {
        id: driver.create_shader(stage),
        stage,
        driver: driver.clone(),
    };

    driver.compile_shader(shader.id, &source);

    if !driver.compile_status(shader.id) {
        let log = non_empty(info_log::to_text(&driver.shader_info_log(shader.id)));
        error!("Could not compile {} shader: {}", stage, log);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// Links a vertex and a fragment stage into a program.
///
/// Both stages are detached and deleted before this returns, on success and on failure alike. A
/// program that fails to link is deleted too, so the caller only ever sees a working one.
pub fn link<D: ShaderDriver>(
    vertex: CompiledStage<D>,
    fragment: CompiledStage<D>,
) -> Result<ShaderProgram<D>, ShaderError> {
    debug_assert_eq!(vertex.stage, ShaderStage::Vertex);
    debug_assert_eq!(fragment.stage, ShaderStage::Fragment);

    let driver = vertex.driver.clone();
    let program = ShaderProgram {
        id: driver.create_program(),
        driver: driver.clone(),
    };

    let stages = [vertex, fragment];
    for stage in &stages {
        driver.attach_shader(program.id, stage.id);
    }

    driver.link_program(program.id);
    let linked = driver.link_status(program.id);
    let log = if linked {
        None
    } else {
        Some(non_empty(info_log::to_text(&driver.program_info_log(program.id))))
    };

    for stage in &stages {
        driver.detach_shader(program.id, stage.id);
    }
    drop(stages);

    match log {
        None => Ok(program),
        Some(log) => {
            error!("Could not link program: {}", log);
            Err(ShaderError::Link { log })
        }
    }
}

/// Compiles both stages, links them, and makes the result the active program.
///
/// Stops at the first failure: a vertex stage that doesn't compile means the fragment source is
/// never submitted and no program object is created. Nothing built along the way outlives a
/// failed call.
pub fn build_program<D: ShaderDriver>(
    driver: &D,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<D>, ShaderError> {
    let vertex = compile_stage(driver, vertex_source, ShaderStage::Vertex)?;
    let fragment = compile_stage(driver, fragment_source, ShaderStage::Fragment)?;
    let program = link(vertex, fragment)?;

    program.set_used();
    debug!("Linked shader program {}", program.id);

    Ok(program)
}

fn non_empty(log: String) -> String {
    if log.is_empty() {
        String::from("(driver gave no diagnostic)")
    } else {
        log
    }
}
