//! Turns GLSL vertex and fragment source text into a linked, active program.
//!
//! Everything here talks to the graphics driver through [`ShaderDriver`], so the build steps can be
//! exercised without a live context. [`GlDriver`] is the implementation backed by the `gl` crate's
//! loaded function pointers; it requires `gl::load_with` to have been called on the thread that
//! owns the current context.

pub mod driver;
pub mod error;
pub mod info_log;
pub mod program;

pub use driver::{GlDriver, ShaderDriver};
pub use error::ShaderError;
pub use info_log::INFO_LOG_CAPACITY;
pub use program::{build_program, compile_stage, link, CompiledStage, ShaderProgram, ShaderStage};

#[cfg(test)]
pub(crate) mod fake;
