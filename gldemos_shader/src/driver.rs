//! The calls the program builder needs from the graphics driver.

use std::ffi::CStr;
use std::ptr::null;

use gl;
use gl::types::*;

use crate::info_log;
use crate::program::ShaderStage;

/// The subset of the OpenGL API used to compile and link programs.
///
/// Object names are the driver's raw `u32` names. Every method must be called on the thread that
/// owns the current context, which is why implementations are not expected to be `Send`.
pub trait ShaderDriver: Clone {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn compile_shader(&self, shader: u32, source: &CStr);
    fn compile_status(&self, shader: u32) -> bool;
    /// At most `info_log::INFO_LOG_CAPACITY + 1` bytes, including any NUL the driver wrote.
    fn shader_info_log(&self, shader: u32) -> Vec<u8>;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    /// Same bound as [`ShaderDriver::shader_info_log`].
    fn program_info_log(&self, program: u32) -> Vec<u8>;
    fn delete_program(&self, program: u32);

    fn use_program(&self, program: u32);
    /// Name of the program bound by the last `use_program`, or 0.
    fn current_program(&self) -> u32;
    /// -1 when the program has no active uniform called `name`.
    fn uniform_location(&self, program: u32, name: &CStr) -> i32;
}

/// [`ShaderDriver`] over the global function pointers loaded by `gl::load_with`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlDriver;

impl ShaderDriver for GlDriver {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage as GLenum) }
    }

    fn compile_shader(&self, shader: u32, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), null());
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> Vec<u8> {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };

        read_info_log(len, |size, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, size, written, buf)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> Vec<u8> {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };

        read_info_log(len, |size, written, buf| unsafe {
            gl::GetProgramInfoLog(program, size, written, buf)
        })
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn current_program(&self) -> u32 {
        let mut id = 0;
        unsafe { gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut id) };
        id as u32
    }

    fn uniform_location(&self, program: u32, name: &CStr) -> i32 {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }
}

/// Reads a shader or program log through a buffer no larger than the capacity allows. `fetch`
/// gets the buffer size, a slot for the written length and the buffer itself.
fn read_info_log<F>(reported_len: GLint, fetch: F) -> Vec<u8>
    where F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar)
{
    let size = info_log::buffer_len(reported_len);
    if size == 0 {
        return vec![];
    }

    let mut buf = vec![0u8; size];
    let mut written: GLsizei = 0;
    fetch(size as GLsizei, &mut written as *mut GLsizei, buf.as_mut_ptr() as *mut GLchar);

    buf.truncate((written.max(0) as usize).min(size));
    buf
}
